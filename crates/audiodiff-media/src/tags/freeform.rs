//! Custom (freeform) field names.
//!
//! Every container stores user-defined fields its own way: Vorbis comments
//! use the bare upper-case name, iTunes atoms a `----:com.apple.iTunes:`
//! mean/name pair, ID3v2 a `TXXX` frame with a description. A [`Freeform`]
//! maps between those native names and the lower-case vocabulary key.

/// Freeform naming convention of one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Freeform {
    prefix: &'static str,
    upper_case: bool,
}

/// Vorbis comments (FLAC).
pub const VORBIS: Freeform = Freeform::new("", true);

/// iTunes metadata atoms (M4A).
pub const ITUNES: Freeform = Freeform::new("----:com.apple.iTunes:", false);

/// ID3v2 user text frames (MP3).
pub const ID3V2: Freeform = Freeform::new("TXXX:", false);

/// Containers without custom fields.
pub const NONE: Freeform = Freeform::new("", false);

impl Freeform {
    pub const fn new(prefix: &'static str, upper_case: bool) -> Self {
        Self { prefix, upper_case }
    }

    /// The vocabulary key for a native field name.
    pub fn normalize(&self, native: &str) -> String {
        native
            .strip_prefix(self.prefix)
            .unwrap_or(native)
            .to_lowercase()
    }

    /// The native field name storing a vocabulary key.
    pub fn native_name(&self, key: &str) -> String {
        if self.upper_case {
            format!("{}{}", self.prefix, key.to_uppercase())
        } else {
            format!("{}{}", self.prefix, key)
        }
    }
}
