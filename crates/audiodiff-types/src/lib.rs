//! Foundation types for audiodiff.
//!
//! Every other audiodiff crate depends on `audiodiff-types`.
//!
//! # Key Types
//!
//! - [`Outcome`] -- Per-comparison verdict, aggregated by maximum
//! - [`TagValue`] / [`TagMap`] -- Normalized audio metadata
//! - [`AudioFormat`] -- The recognized audio extensions
//! - [`PathEntry`] -- A path with its extension-stripped canonical name

pub mod entry;
pub mod format;
pub mod outcome;
pub mod tag;

pub use entry::PathEntry;
pub use format::{extension, AudioFormat};
pub use outcome::Outcome;
pub use tag::{TagMap, TagValue};
