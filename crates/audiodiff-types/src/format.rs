use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// An audio container recognized by extension.
///
/// Files with one of these extensions are compared by decoded stream and
/// normalized tags; everything else is compared byte for byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Wav,
    Flac,
    M4a,
    Mp3,
}

impl AudioFormat {
    /// Every recognized format.
    pub const ALL: [AudioFormat; 4] = [
        AudioFormat::Wav,
        AudioFormat::Flac,
        AudioFormat::M4a,
        AudioFormat::Mp3,
    ];

    /// The canonical (lowercase) extension.
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
            AudioFormat::M4a => "m4a",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Match an extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<AudioFormat> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// The format of a path, if its extension is recognized.
    pub fn from_path(path: impl AsRef<Path>) -> Option<AudioFormat> {
        extension(path.as_ref()).and_then(Self::from_extension)
    }

    /// Returns `true` if the path has a recognized audio extension.
    pub fn is_supported(path: impl AsRef<Path>) -> bool {
        Self::from_path(path).is_some()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The text after the last `.` of the final path component.
///
/// Unlike [`Path::extension`], a leading dot counts, so `.flac` has the
/// extension `flac`.
pub fn extension(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rsplit_once('.').map(|(_, ext)| ext)
}
