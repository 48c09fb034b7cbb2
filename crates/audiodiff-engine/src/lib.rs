//! Recursive tree differ for audiodiff.
//!
//! Walks two paths in lockstep, pairs directory entries by canonical name,
//! compares each pair of files (audio-aware or byte for byte), reports every
//! decision, and folds the results into a single [`Outcome`].
//!
//! # Key Types
//!
//! - [`DiffOptions`] -- Immutable configuration threaded through a run
//! - [`Classifier`] -- Chooses and runs the comparison for one pair of files
//! - [`TreeDiffer`] -- The recursive walk and outcome aggregation
//! - [`Reporter`] / [`Event`] -- Text or JSON rendering of decisions

pub mod classifier;
pub mod config;
pub mod error;
pub mod report;
pub mod tree;

#[cfg(test)]
pub(crate) mod testing;

pub use audiodiff_types::Outcome;
pub use classifier::{Check, Classifier, Strategy, TagDiff, Verdict};
pub use config::{CompareMode, DiffOptions};
pub use error::{EngineError, EngineResult};
pub use report::{Event, ReportFormat, ReportStyle, Reporter};
pub use tree::{diff_paths, PathKind, TreeDiffer};
