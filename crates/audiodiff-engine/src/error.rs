//! Error types for the engine crate.

use std::io;
use std::path::{Path, PathBuf};

use audiodiff_media::MediaError;

/// Errors that stop the comparison of one pair of paths.
///
/// Every variant except [`EngineError::Output`] is reported and turned into
/// an `Error` outcome for that pair; the walk then continues with siblings.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An input path does not exist.
    #[error("No such file or directory: '{}'", .0.display())]
    PathNotFound(PathBuf),

    /// A file was compared with something that is not a file.
    #[error("cannot compare file '{}' with non-file '{}'", file.display(), other.display())]
    TypeMismatch { file: PathBuf, other: PathBuf },

    /// A path exists but is neither a regular file nor a directory.
    #[error("Unknown files: '{}' and/or '{}'", left.display(), right.display())]
    UnknownFileType { left: PathBuf, right: PathBuf },

    /// A directory could not be listed.
    #[error("{source}: '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A media collaborator failed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Writing the report failed; this aborts the whole traversal.
    #[error("cannot write report: {0}")]
    Output(#[source] io::Error),
}

impl EngineError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        EngineError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns `true` if the error ends the traversal rather than one pair.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Output(_))
    }
}

/// Convenience alias for engine results.
pub type EngineResult<T> = Result<T, EngineError>;
