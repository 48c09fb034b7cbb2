use std::collections::BTreeSet;
use std::path::PathBuf;

use audiodiff_media::tags::keys::ENCODED_BY;
use audiodiff_media::FfmpegDecoder;
use serde::{Deserialize, Serialize};

/// Which sides of an audio pair are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Decoded streams and tags.
    #[default]
    Full,
    /// Decoded streams only; tags are never read.
    StreamsOnly,
    /// Tags only; nothing is decoded.
    TagsOnly,
}

impl CompareMode {
    pub fn compares_streams(self) -> bool {
        !matches!(self, CompareMode::TagsOnly)
    }

    pub fn compares_tags(self) -> bool {
        !matches!(self, CompareMode::StreamsOnly)
    }
}

/// Configuration for one comparison run.
///
/// Built once by the caller and passed by reference through the whole
/// recursion; nothing mutates it during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Which sides of audio pairs are compared.
    pub mode: CompareMode,
    /// Report a tag difference as one line instead of a record block.
    pub brief: bool,
    /// Also report comparisons that found no difference.
    pub report_identical: bool,
    /// The decoder executable.
    pub ffmpeg_bin: PathBuf,
    /// Tag keys removed from both sides before comparing.
    pub ignored_tags: BTreeSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            mode: CompareMode::Full,
            brief: false,
            report_identical: false,
            ffmpeg_bin: PathBuf::from(FfmpegDecoder::DEFAULT_BIN),
            ignored_tags: BTreeSet::from([ENCODED_BY.to_string()]),
        }
    }
}

impl DiffOptions {
    /// Compare decoded streams only.
    pub fn streams_only() -> Self {
        Self {
            mode: CompareMode::StreamsOnly,
            ..Default::default()
        }
    }

    /// Compare tags only.
    pub fn tags_only() -> Self {
        Self {
            mode: CompareMode::TagsOnly,
            ..Default::default()
        }
    }

    pub fn is_ignored(&self, key: &str) -> bool {
        self.ignored_tags.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DiffOptions::default();
        assert_eq!(options.mode, CompareMode::Full);
        assert!(!options.brief);
        assert!(!options.report_identical);
        assert_eq!(options.ffmpeg_bin, PathBuf::from("ffmpeg"));
        assert!(options.is_ignored("encodedby"));
        assert!(!options.is_ignored("title"));
    }

    #[test]
    fn modes() {
        assert!(CompareMode::Full.compares_streams() && CompareMode::Full.compares_tags());
        assert!(!DiffOptions::streams_only().mode.compares_tags());
        assert!(!DiffOptions::tags_only().mode.compares_streams());
    }

    #[test]
    fn round_trips_through_json() {
        let options = DiffOptions::tags_only();
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"tags_only\""));
        let back: DiffOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
