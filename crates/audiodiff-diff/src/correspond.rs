//! Name correspondence: align two sorted listings with a merge-join.
//!
//! Entries of two directory listings are matched by canonical name. Both
//! inputs are walked with one cursor each; equal heads pair up, and a
//! strictly smaller head is emitted alone.

use std::cmp::Ordering;

/// One aligned pair of a correspondence. At most one side is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Correspondence<T> {
    /// The name is present in both inputs.
    Both(T, T),
    /// The name is present only in the left input.
    LeftOnly(T),
    /// The name is present only in the right input.
    RightOnly(T),
}

impl<T> Correspondence<T> {
    pub fn left(&self) -> Option<&T> {
        match self {
            Correspondence::Both(l, _) | Correspondence::LeftOnly(l) => Some(l),
            Correspondence::RightOnly(_) => None,
        }
    }

    pub fn right(&self) -> Option<&T> {
        match self {
            Correspondence::Both(_, r) | Correspondence::RightOnly(r) => Some(r),
            Correspondence::LeftOnly(_) => None,
        }
    }

    /// Returns `true` if both sides are present.
    pub fn is_paired(&self) -> bool {
        matches!(self, Correspondence::Both(..))
    }

    /// The pair as `(left, right)` options.
    pub fn into_options(self) -> (Option<T>, Option<T>) {
        match self {
            Correspondence::Both(l, r) => (Some(l), Some(r)),
            Correspondence::LeftOnly(l) => (Some(l), None),
            Correspondence::RightOnly(r) => (None, Some(r)),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Correspondence<U> {
        match self {
            Correspondence::Both(l, r) => Correspondence::Both(f(l), f(r)),
            Correspondence::LeftOnly(l) => Correspondence::LeftOnly(f(l)),
            Correspondence::RightOnly(r) => Correspondence::RightOnly(f(r)),
        }
    }
}

/// Align two sorted sequences.
///
/// Both inputs must be sorted by `Ord`; the result follows the merge order
/// of their union and holds every input element exactly once. Linear in the
/// combined length. The result is unspecified for unsorted input.
pub fn correspond<'a, T: Ord>(left: &'a [T], right: &'a [T]) -> Vec<Correspondence<&'a T>> {
    let mut pairs = Vec::with_capacity(left.len().max(right.len()));
    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            Ordering::Equal => {
                pairs.push(Correspondence::Both(&left[i], &right[j]));
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                pairs.push(Correspondence::LeftOnly(&left[i]));
                i += 1;
            }
            Ordering::Greater => {
                pairs.push(Correspondence::RightOnly(&right[j]));
                j += 1;
            }
        }
    }

    pairs.extend(left[i..].iter().map(Correspondence::LeftOnly));
    pairs.extend(right[j..].iter().map(Correspondence::RightOnly));
    pairs
}
