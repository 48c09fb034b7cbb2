//! Equivalence rules for one pair of files.
//!
//! Two recognized audio files are equivalent when their decoded streams and
//! their normalized tags match, whatever their containers. Anything else is
//! compared byte for byte.

use std::path::Path;

use audiodiff_diff::{diff_maps, StructuredDiff};
use audiodiff_media::{files_equal, StreamDecoder, TagReader};
use audiodiff_types::{Outcome, PathEntry, TagMap, TagValue};
use tracing::debug;

use crate::config::DiffOptions;
use crate::error::EngineResult;

/// Signed tag records of one audio pair.
pub type TagDiff = StructuredDiff<String, TagValue>;

/// How a pair of files is compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Both sides carry a recognized audio extension.
    Audio,
    /// Raw byte comparison.
    Binary,
}

/// Result of one side of an audio comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Check {
    /// Elided by the compare mode.
    Skipped,
    Equal,
    Differ,
}

impl Check {
    pub fn from_equal(equal: bool) -> Check {
        if equal {
            Check::Equal
        } else {
            Check::Differ
        }
    }

    /// Whether the sides matched, or `None` when the check was skipped.
    pub fn equal(self) -> Option<bool> {
        match self {
            Check::Skipped => None,
            Check::Equal => Some(true),
            Check::Differ => Some(false),
        }
    }

    /// A skipped check never produces a difference.
    pub fn outcome(self) -> Outcome {
        match self {
            Check::Skipped | Check::Equal => Outcome::Identical,
            Check::Differ => Outcome::Differ,
        }
    }
}

/// The full verdict for a pair of files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Audio {
        streams: Check,
        tags: Check,
        /// Tag records; `None` when tags were skipped.
        diff: Option<TagDiff>,
    },
    Binary { equal: bool },
}

impl Verdict {
    pub fn outcome(&self) -> Outcome {
        match self {
            Verdict::Audio { streams, tags, .. } => streams.outcome().combine(tags.outcome()),
            Verdict::Binary { equal } => Outcome::from_equal(*equal),
        }
    }
}

/// Runs comparisons for one configuration and one pair of collaborators.
///
/// Holds no state between calls; every comparison goes back to the
/// collaborators.
pub struct Classifier<'a> {
    options: &'a DiffOptions,
    streams: &'a dyn StreamDecoder,
    tags: &'a dyn TagReader,
}

impl<'a> Classifier<'a> {
    pub fn new(
        options: &'a DiffOptions,
        streams: &'a dyn StreamDecoder,
        tags: &'a dyn TagReader,
    ) -> Self {
        Self {
            options,
            streams,
            tags,
        }
    }

    pub fn options(&self) -> &'a DiffOptions {
        self.options
    }

    /// Audio when both entries carry a recognized audio extension.
    pub fn strategy(left: &PathEntry, right: &PathEntry) -> Strategy {
        if left.is_audio() && right.is_audio() {
            Strategy::Audio
        } else {
            Strategy::Binary
        }
    }

    /// Whether the decoded streams of two audio files are identical.
    pub fn compare_streams(&self, left: &Path, right: &Path) -> EngineResult<bool> {
        let equal = self.streams.streams_equal(left, right)?;
        debug!(left = %left.display(), right = %right.display(), equal, "compared streams");
        Ok(equal)
    }

    /// Diff the tags of two audio files, ignored keys removed from both sides.
    pub fn compare_tags(&self, left: &Path, right: &Path) -> EngineResult<TagDiff> {
        let left_tags = self.filtered_tags(left)?;
        let right_tags = self.filtered_tags(right)?;
        let diff = diff_maps(&left_tags, &right_tags);
        debug!(
            left = %left.display(),
            right = %right.display(),
            removals = diff.removals(),
            additions = diff.additions(),
            "compared tags"
        );
        Ok(diff)
    }

    /// Whether two files have byte-identical content.
    pub fn compare_bytes(&self, left: &Path, right: &Path) -> EngineResult<bool> {
        let equal = files_equal(left, right)?;
        debug!(left = %left.display(), right = %right.display(), equal, "compared bytes");
        Ok(equal)
    }

    /// Apply the rule for the configured mode and return the verdict.
    pub fn classify(&self, left: &PathEntry, right: &PathEntry) -> EngineResult<Verdict> {
        match Self::strategy(left, right) {
            Strategy::Audio => {
                let mode = self.options.mode;
                let streams = if mode.compares_streams() {
                    Check::from_equal(self.compare_streams(left.path(), right.path())?)
                } else {
                    Check::Skipped
                };
                let diff = if mode.compares_tags() {
                    Some(self.compare_tags(left.path(), right.path())?)
                } else {
                    None
                };
                let tags = diff
                    .as_ref()
                    .map_or(Check::Skipped, |diff| Check::from_equal(diff.all_equal()));
                Ok(Verdict::Audio {
                    streams,
                    tags,
                    diff,
                })
            }
            Strategy::Binary => Ok(Verdict::Binary {
                equal: self.compare_bytes(left.path(), right.path())?,
            }),
        }
    }

    /// Whether two files are equivalent under the configured mode.
    pub fn equivalent(&self, left: &Path, right: &Path) -> EngineResult<bool> {
        let verdict = self.classify(&PathEntry::new(left), &PathEntry::new(right))?;
        Ok(verdict.outcome() == Outcome::Identical)
    }

    fn filtered_tags(&self, path: &Path) -> EngineResult<TagMap> {
        let mut tags = self.tags.read_tags(path)?;
        tags.retain(|key, _| !self.options.is_ignored(key));
        Ok(tags)
    }
}
