//! Error types for the media crate.

use std::io;
use std::path::{Path, PathBuf};

/// Errors raised by the media collaborators.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// A tag operation was requested on a path without a recognized
    /// audio extension.
    #[error("{} is not a supported audio file", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The external decoder failed or produced no audio.
    #[error("decoding '{}' failed: {message}", path.display())]
    ExternalTool { path: PathBuf, message: String },

    /// The file could not be opened or read.
    #[error("{source}: '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tag library rejected the file.
    #[error("cannot read tags from '{}': {message}", path.display())]
    Tags { path: PathBuf, message: String },
}

impl MediaError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        MediaError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn external_tool(path: &Path, message: impl Into<String>) -> Self {
        MediaError::ExternalTool {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Convenience alias for media results.
pub type MediaResult<T> = Result<T, MediaError>;
