//! WAV carries no comparable tags; every readable WAV has an empty map.

use std::fs::File;
use std::path::Path;

use audiodiff_types::{AudioFormat, TagMap};

use super::TagCodec;
use crate::error::{MediaError, MediaResult};

pub struct WavCodec;

impl TagCodec for WavCodec {
    fn format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        File::open(path).map_err(|e| MediaError::io(path, e))?;
        Ok(TagMap::new())
    }
}
