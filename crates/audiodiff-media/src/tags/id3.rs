//! MP3 tags: ID3v2, falling back to ID3v1.

use std::path::Path;

use audiodiff_types::{AudioFormat, TagMap};
use lofty::tag::TagType;

use super::{freeform, read_container_tag, Freeform, TagCodec};
use crate::error::MediaResult;

pub struct Id3Codec;

impl TagCodec for Id3Codec {
    fn format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn freeform(&self) -> Freeform {
        freeform::ID3V2
    }

    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        read_container_tag(path, &[TagType::Id3v2, TagType::Id3v1], &self.freeform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;

    #[test]
    fn custom_fields_use_txxx_frames() {
        assert_eq!(Id3Codec.freeform().native_name("x_foo"), "TXXX:x_foo");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Id3Codec.read_tags(Path::new("/nonexistent/audiodiff/a.mp3")).unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }
}
