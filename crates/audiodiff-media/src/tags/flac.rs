//! FLAC tags: Vorbis comments plus PICTURE blocks.

use std::path::Path;

use audiodiff_types::{AudioFormat, TagMap};
use lofty::tag::TagType;

use super::{freeform, read_container_tag, Freeform, TagCodec};
use crate::error::MediaResult;

pub struct FlacCodec;

impl TagCodec for FlacCodec {
    fn format(&self) -> AudioFormat {
        AudioFormat::Flac
    }

    fn freeform(&self) -> Freeform {
        freeform::VORBIS
    }

    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        read_container_tag(path, &[TagType::VorbisComments], &self.freeform())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaError;

    #[test]
    fn custom_fields_use_vorbis_names() {
        assert_eq!(FlacCodec.freeform().native_name("x_foo"), "X_FOO");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FlacCodec.read_tags(Path::new("/nonexistent/audiodiff/a.flac")).unwrap_err();
        assert!(matches!(err, MediaError::Io { .. }));
    }

    #[test]
    fn corrupt_file_is_tag_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.flac");
        std::fs::write(&path, b"definitely not a flac stream").unwrap();
        let err = FlacCodec.read_tags(&path).unwrap_err();
        assert!(matches!(err, MediaError::Tags { .. }));
    }
}
