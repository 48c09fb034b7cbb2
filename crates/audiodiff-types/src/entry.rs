//! Paths paired with their canonical names.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::format::{extension, AudioFormat};

/// A file-system path and its canonical name.
///
/// The canonical name is the path with a recognized audio extension
/// stripped (`foo/bar.m4a` → `foo/bar`), so `a.flac` on one side matches
/// `a.mp3` on the other. It is computed once, in [`PathEntry::new`]; the
/// display flag only changes how [`PathEntry::display_name`] renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathEntry {
    path: PathBuf,
    canonical: PathBuf,
    format: Option<AudioFormat>,
    show_extension: bool,
}

impl PathEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = AudioFormat::from_path(&path);
        let canonical = match (format, strip_extension(&path)) {
            (Some(_), Some(stripped)) => stripped,
            _ => path.clone(),
        };
        Self {
            path,
            canonical,
            format,
            show_extension: true,
        }
    }

    /// Return a copy with the extension shown or hidden in display names.
    pub fn with_extension_shown(mut self, shown: bool) -> Self {
        self.show_extension = shown;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path with a recognized audio extension stripped.
    pub fn canonical_path(&self) -> &Path {
        &self.canonical
    }

    /// Final component of the canonical path; the key used to match entries
    /// across two directory listings.
    pub fn canonical_name(&self) -> &OsStr {
        self.canonical
            .file_name()
            .unwrap_or_else(|| self.canonical.as_os_str())
    }

    /// Final component of the path as shown to the user.
    pub fn display_name(&self) -> &OsStr {
        if self.show_extension {
            self.path.file_name().unwrap_or_else(|| self.path.as_os_str())
        } else {
            self.canonical_name()
        }
    }

    pub fn extension_shown(&self) -> bool {
        self.show_extension
    }

    /// The recognized audio format, if any.
    pub fn format(&self) -> Option<AudioFormat> {
        self.format
    }

    pub fn is_audio(&self) -> bool {
        self.format.is_some()
    }
}

impl fmt::Display for PathEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_extension {
            write!(f, "{}", self.path.display())
        } else {
            write!(f, "{}", self.canonical.display())
        }
    }
}

fn strip_extension(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let ext = extension(path)?;
    let stem = &name[..name.len() - ext.len() - 1];
    if stem.is_empty() {
        return None;
    }
    Some(path.with_file_name(stem))
}
