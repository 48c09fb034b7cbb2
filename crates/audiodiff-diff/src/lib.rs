//! Diff algorithms for audiodiff.
//!
//! Pure functions with no I/O: pairing two sorted listings of canonical
//! names, and computing signed, sorted change records between two maps.
//!
//! # Key Types
//!
//! - [`Correspondence`] -- One aligned pair of a sorted merge-join
//! - [`StructuredDiff`] / [`DiffRecord`] / [`Sign`] -- Key/value diff records

pub mod correspond;
pub mod structured;

pub use correspond::{correspond, Correspondence};
pub use structured::{diff_maps, DiffRecord, Sign, StructuredDiff};
