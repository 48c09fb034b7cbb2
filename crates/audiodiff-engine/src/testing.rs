//! Fake collaborators for engine tests.
//!
//! Fixture "audio" files are plain text: the first line stands for the
//! decoded stream and every following `key=value` line is a tag. A first
//! line of `!fail` makes decoding fail.

use std::fs;
use std::path::Path;

use audiodiff_media::{MediaError, MediaResult, StreamDecoder, StreamDigest, TagReader};
use audiodiff_types::{AudioFormat, TagMap, TagValue};

pub struct FakeStreams;

impl StreamDecoder for FakeStreams {
    fn decode(&self, path: &Path) -> MediaResult<StreamDigest> {
        let text = fs::read_to_string(path).map_err(|e| MediaError::io(path, e))?;
        let stream = text.lines().next().unwrap_or_default();
        if stream == "!fail" {
            return Err(MediaError::external_tool(path, "Invalid data found when processing input"));
        }
        Ok(StreamDigest::of(stream.as_bytes()))
    }
}

pub struct FakeTags;

impl TagReader for FakeTags {
    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        if !AudioFormat::is_supported(path) {
            return Err(MediaError::UnsupportedFormat(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| MediaError::io(path, e))?;
        Ok(text
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once('='))
            .map(|(k, v)| (k.to_string(), TagValue::from(v)))
            .collect())
    }
}

/// Write `contents` to `dir/name`, creating parent directories.
pub fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
