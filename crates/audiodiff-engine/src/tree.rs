//! Recursive comparison of two file-system trees.
//!
//! Directory entries are paired by canonical name, so `x/a.flac` meets
//! `y/a.mp3`. Every pair is classified, compared and reported, and the
//! outcomes fold into one worst-case [`Outcome`].

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use audiodiff_diff::{correspond, Correspondence};
use audiodiff_media::{StreamDecoder, TagReader};
use audiodiff_types::{Outcome, PathEntry};
use tracing::debug;
use walkdir::WalkDir;

use crate::classifier::{Classifier, Verdict};
use crate::config::DiffOptions;
use crate::error::{EngineError, EngineResult};
use crate::report::Reporter;

/// What a path refers to on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathKind {
    File,
    Dir,
    Missing,
    /// Exists but is neither a regular file nor a directory.
    Other,
}

impl PathKind {
    /// Classify `path`, following symbolic links.
    pub fn of(path: &Path) -> PathKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => PathKind::File,
            Ok(meta) if meta.is_dir() => PathKind::Dir,
            Ok(_) => PathKind::Other,
            Err(_) => PathKind::Missing,
        }
    }
}

/// Entries of one directory listing grouped by canonical name.
type Groups = BTreeMap<OsString, Vec<PathEntry>>;

/// Walks two trees in lockstep and reports every decision.
pub struct TreeDiffer<'a, W: Write, E: Write> {
    classifier: Classifier<'a>,
    reporter: &'a mut Reporter<W, E>,
}

impl<'a, W: Write, E: Write> TreeDiffer<'a, W, E> {
    pub fn new(classifier: Classifier<'a>, reporter: &'a mut Reporter<W, E>) -> Self {
        Self {
            classifier,
            reporter,
        }
    }

    /// Compare two paths of any kind and return the aggregated outcome.
    ///
    /// A failure confined to this pair is reported and becomes
    /// [`Outcome::Error`]. Only a failure to write the report is returned.
    pub fn diff(&mut self, left: &Path, right: &Path) -> EngineResult<Outcome> {
        match self.diff_recurse(left, right) {
            Ok(outcome) => Ok(outcome),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!(left = %left.display(), right = %right.display(), error = %e, "comparison failed");
                self.reporter.error(e.to_string()).map_err(EngineError::Output)?;
                Ok(Outcome::Error)
            }
        }
    }

    fn diff_recurse(&mut self, left: &Path, right: &Path) -> EngineResult<Outcome> {
        match (PathKind::of(left), PathKind::of(right)) {
            (PathKind::File, PathKind::File) => {
                self.diff_files(&PathEntry::new(left), &PathEntry::new(right))
            }
            (PathKind::Dir, PathKind::Dir) => self.diff_dirs(left, right),
            (PathKind::File, PathKind::Dir) => {
                let resolved = resolve_in(right, left)?;
                check_resolved(left, &resolved)?;
                self.diff_files(&PathEntry::new(left), &PathEntry::new(resolved))
            }
            (PathKind::Dir, PathKind::File) => {
                let resolved = resolve_in(left, right)?;
                check_resolved(right, &resolved)?;
                self.diff_files(&PathEntry::new(resolved), &PathEntry::new(right))
            }
            (PathKind::Missing, _) => Err(EngineError::PathNotFound(left.to_path_buf())),
            (_, PathKind::Missing) => Err(EngineError::PathNotFound(right.to_path_buf())),
            _ => Err(EngineError::UnknownFileType {
                left: left.to_path_buf(),
                right: right.to_path_buf(),
            }),
        }
    }

    /// Classify one pair and report its verdict; skipped checks are silent.
    fn diff_files(&mut self, left: &PathEntry, right: &PathEntry) -> EngineResult<Outcome> {
        let (l, r) = (left.path(), right.path());
        let verdict = self.classifier.classify(left, right)?;
        match &verdict {
            Verdict::Audio {
                streams,
                tags,
                diff,
            } => {
                if let Some(equal) = streams.equal() {
                    self.reporter
                        .streams(l, r, equal)
                        .map_err(EngineError::Output)?;
                }
                if let Some(equal) = tags.equal() {
                    let records = diff.as_ref().map(|diff| diff.records.as_slice());
                    self.reporter
                        .tags(l, r, equal, records)
                        .map_err(EngineError::Output)?;
                }
            }
            Verdict::Binary { equal } => {
                self.reporter
                    .files(l, r, *equal)
                    .map_err(EngineError::Output)?;
            }
        }
        Ok(verdict.outcome())
    }

    fn diff_dirs(&mut self, left: &Path, right: &Path) -> EngineResult<Outcome> {
        let left_groups = list_groups(left)?;
        let right_groups = list_groups(right)?;
        let left_names: Vec<&OsString> = left_groups.keys().collect();
        let right_names: Vec<&OsString> = right_groups.keys().collect();

        let mut outcome = Outcome::Identical;
        for pair in correspond(&left_names, &right_names) {
            match pair {
                Correspondence::Both(name, _) => {
                    for l in group(&left_groups, name) {
                        for r in group(&right_groups, name) {
                            outcome = outcome.combine(self.diff(l.path(), r.path())?);
                        }
                    }
                }
                Correspondence::LeftOnly(name) => {
                    outcome = outcome.combine(self.only_in(left, group(&left_groups, name))?);
                }
                Correspondence::RightOnly(name) => {
                    outcome = outcome.combine(self.only_in(right, group(&right_groups, name))?);
                }
            }
        }
        Ok(outcome)
    }

    fn only_in(&mut self, dir: &Path, entries: &[PathEntry]) -> EngineResult<Outcome> {
        for entry in entries {
            self.reporter
                .only_in(dir, Path::new(entry.display_name()))
                .map_err(EngineError::Output)?;
        }
        Ok(Outcome::Differ)
    }
}

/// Compare two paths and report through `reporter`.
///
/// Returns the worst outcome of the whole comparison, or an error only when
/// the report itself could not be written.
pub fn diff_paths<W: Write, E: Write>(
    left: &Path,
    right: &Path,
    options: &DiffOptions,
    streams: &dyn StreamDecoder,
    tags: &dyn TagReader,
    reporter: &mut Reporter<W, E>,
) -> EngineResult<Outcome> {
    let classifier = Classifier::new(options, streams, tags);
    let outcome = TreeDiffer::new(classifier, reporter).diff(left, right)?;
    reporter.flush().map_err(EngineError::Output)?;
    debug!(%outcome, "diff finished");
    Ok(outcome)
}

/// List `dir` one level deep, grouped by canonical name in sorted order.
fn list_groups(dir: &Path) -> EngineResult<Groups> {
    let mut groups = Groups::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| EngineError::io(dir, e.into()))?;
        let entry = PathEntry::new(entry.into_path());
        groups
            .entry(entry.canonical_name().to_os_string())
            .or_default()
            .push(entry);
    }
    debug!(dir = %dir.display(), names = groups.len(), "listed directory");
    Ok(groups)
}

fn group<'g>(groups: &'g Groups, name: &OsString) -> &'g [PathEntry] {
    groups.get(name).map(Vec::as_slice).unwrap_or_default()
}

/// The path inside `dir` named like `file`.
fn resolve_in(dir: &Path, file: &Path) -> EngineResult<PathBuf> {
    match file.file_name() {
        Some(name) => Ok(dir.join(name)),
        None => Err(EngineError::TypeMismatch {
            file: file.to_path_buf(),
            other: dir.to_path_buf(),
        }),
    }
}

fn check_resolved(file: &Path, resolved: &Path) -> EngineResult<()> {
    match PathKind::of(resolved) {
        PathKind::File => Ok(()),
        PathKind::Missing => Err(EngineError::PathNotFound(resolved.to_path_buf())),
        PathKind::Dir | PathKind::Other => Err(EngineError::TypeMismatch {
            file: file.to_path_buf(),
            other: resolved.to_path_buf(),
        }),
    }
}
