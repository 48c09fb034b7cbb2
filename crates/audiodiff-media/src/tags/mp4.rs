//! M4A tags: iTunes `ilst` atoms.
//!
//! `trkn`/`disk` pairs are split by lofty into number and total items;
//! `----` freeform atoms keep their name after the iTunes mean prefix.

use std::path::Path;

use audiodiff_types::{AudioFormat, TagMap};
use lofty::tag::TagType;

use super::{freeform, read_container_tag, Freeform, TagCodec};
use crate::error::MediaResult;

pub struct Mp4Codec;

impl TagCodec for Mp4Codec {
    fn format(&self) -> AudioFormat {
        AudioFormat::M4a
    }

    fn freeform(&self) -> Freeform {
        freeform::ITUNES
    }

    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        read_container_tag(path, &[TagType::Mp4Ilst], &self.freeform())
    }
}
