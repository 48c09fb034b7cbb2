//! Normalized tag reading.
//!
//! Each container format has its own [`TagCodec`]; a [`CodecRegistry`]
//! selects the codec from the path's extension. Codecs read the container's
//! native tag with `lofty` and map its fields into a common vocabulary, so
//! a FLAC file and an equivalent M4A produce equal [`TagMap`]s.

pub mod flac;
pub mod freeform;
pub mod id3;
pub mod keys;
pub mod mp4;
pub mod wav;

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use audiodiff_types::{AudioFormat, TagMap, TagValue};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{ItemValue, Tag, TagType};
use tracing::{debug, trace};

use crate::error::{MediaError, MediaResult};

pub use flac::FlacCodec;
pub use freeform::Freeform;
pub use id3::Id3Codec;
pub use mp4::Mp4Codec;
pub use wav::WavCodec;

/// Source of normalized tags.
pub trait TagReader {
    /// Read the normalized tags of `path`.
    ///
    /// Returns [`MediaError::UnsupportedFormat`] for paths without a
    /// recognized audio extension.
    fn read_tags(&self, path: &Path) -> MediaResult<TagMap>;
}

/// Tag reading for one container format.
pub trait TagCodec: Send + Sync {
    /// The format this codec handles.
    fn format(&self) -> AudioFormat;

    /// How the container names custom fields.
    fn freeform(&self) -> Freeform {
        freeform::NONE
    }

    /// Read and normalize the tags of a file of this format.
    fn read_tags(&self, path: &Path) -> MediaResult<TagMap>;
}

/// Format → codec lookup table.
pub struct CodecRegistry {
    codecs: BTreeMap<AudioFormat, Box<dyn TagCodec>>,
}

impl CodecRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            codecs: BTreeMap::new(),
        }
    }

    /// A registry with a codec for every [`AudioFormat`].
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(FlacCodec));
        registry.register(Box::new(Mp4Codec));
        registry.register(Box::new(Id3Codec));
        registry.register(Box::new(WavCodec));
        registry
    }

    /// Register a codec, replacing any codec for the same format.
    pub fn register(&mut self, codec: Box<dyn TagCodec>) {
        self.codecs.insert(codec.format(), codec);
    }

    /// The codec for a path's extension.
    pub fn codec_for(&self, path: &Path) -> MediaResult<&dyn TagCodec> {
        AudioFormat::from_path(path)
            .and_then(|format| self.codecs.get(&format))
            .map(|codec| &**codec)
            .ok_or_else(|| MediaError::UnsupportedFormat(path.to_path_buf()))
    }

    /// Formats with a registered codec.
    pub fn formats(&self) -> impl Iterator<Item = AudioFormat> + '_ {
        self.codecs.keys().copied()
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TagReader for CodecRegistry {
    fn read_tags(&self, path: &Path) -> MediaResult<TagMap> {
        self.codec_for(path)?.read_tags(path)
    }
}

/// Read the first present tag of `tag_types` from a file and normalize it.
///
/// A file without any of those tags has an empty map.
pub(crate) fn read_container_tag(
    path: &Path,
    tag_types: &[TagType],
    freeform: &Freeform,
) -> MediaResult<TagMap> {
    File::open(path).map_err(|e| MediaError::io(path, e))?;

    let tagged = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|e| MediaError::Tags {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match tag_types.iter().find_map(|t| tagged.tag(*t)) {
        Some(tag) => Ok(normalize_tag(tag, freeform)),
        None => {
            debug!(path = %path.display(), file_type = ?tagged.file_type(), "no tag found");
            Ok(TagMap::new())
        }
    }
}

/// Map a lofty tag into the common vocabulary.
///
/// Repeated keys collect into a list in tag order; a single occurrence stays
/// a scalar. Embedded images are listed under `pictures`.
pub fn normalize_tag(tag: &Tag, freeform: &Freeform) -> TagMap {
    let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for item in tag.items() {
        let key = match keys::normalized_key(item.key()) {
            Some(key) => key.to_string(),
            None => match item.key().map_key(tag.tag_type(), true) {
                Some(native) => {
                    let key = freeform.normalize(native);
                    trace!(native, key = %key, "freeform field");
                    key
                }
                None => continue,
            },
        };
        let value = match item.value() {
            ItemValue::Text(text) | ItemValue::Locator(text) => keys::normalize_value(&key, text),
            ItemValue::Binary(data) => describe_binary(data),
        };
        values.entry(key).or_default().push(value);
    }

    let pictures: Vec<String> = tag
        .pictures()
        .iter()
        .map(|p| format!("{:?} {}", p.pic_type(), describe_binary(p.data())))
        .collect();
    if !pictures.is_empty() {
        values.entry(keys::PICTURES.to_string()).or_default().extend(pictures);
    }

    values
        .into_iter()
        .filter_map(|(key, v)| TagValue::from_values(v).map(|value| (key, value)))
        .collect()
}

/// Binary payloads compare by size and content digest.
fn describe_binary(data: &[u8]) -> String {
    let hash = blake3::hash(data).to_hex();
    format!("<{} bytes, blake3 {}>", data.len(), &hash.as_str()[..16])
}
