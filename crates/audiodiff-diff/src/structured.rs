//! Structured diff: compare two key/value maps.
//!
//! Produces signed records in the style of a unified diff: `-` for the left
//! value, `+` for the right value, and ` ` for a key whose value is the same
//! on both sides. Records are ordered by key, then `-`, ` `, `+`, so a
//! changed key prints its old value right before its new one.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::correspond::{correspond, Correspondence};

/// The sign of a diff record. Variant order is the record order for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sign {
    /// Present only on the left, or the left value of a changed key.
    #[serde(rename = "-")]
    Removed,
    /// Present on both sides with the same value.
    #[serde(rename = " ")]
    Unchanged,
    /// Present only on the right, or the right value of a changed key.
    #[serde(rename = "+")]
    Added,
}

impl Sign {
    pub fn as_char(self) -> char {
        match self {
            Sign::Removed => '-',
            Sign::Unchanged => ' ',
            Sign::Added => '+',
        }
    }

    /// Swap `-` and `+`.
    pub fn inverted(self) -> Sign {
        match self {
            Sign::Removed => Sign::Added,
            Sign::Unchanged => Sign::Unchanged,
            Sign::Added => Sign::Removed,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One signed line of a structured diff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffRecord<K, V> {
    pub sign: Sign,
    pub key: K,
    pub value: V,
}

impl<K, V> DiffRecord<K, V> {
    pub fn new(sign: Sign, key: K, value: V) -> Self {
        Self { sign, key, value }
    }
}

/// The result of comparing two maps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructuredDiff<K, V> {
    /// Records sorted by key, then sign.
    pub records: Vec<DiffRecord<K, V>>,
}

impl<K, V> Default for StructuredDiff<K, V> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<K, V> StructuredDiff<K, V> {
    /// Returns `true` if every record is unchanged.
    pub fn all_equal(&self) -> bool {
        self.records.iter().all(|r| r.sign == Sign::Unchanged)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if both maps were empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of `-` records.
    pub fn removals(&self) -> usize {
        self.count(Sign::Removed)
    }

    /// Number of `+` records.
    pub fn additions(&self) -> usize {
        self.count(Sign::Added)
    }

    /// Records with a non-space sign, in order.
    pub fn changed(&self) -> impl Iterator<Item = &DiffRecord<K, V>> {
        self.records.iter().filter(|r| r.sign != Sign::Unchanged)
    }

    fn count(&self, sign: Sign) -> usize {
        self.records.iter().filter(|r| r.sign == sign).count()
    }
}

impl<K: Ord + Clone, V: Clone> StructuredDiff<K, V> {
    /// The diff with sides swapped: every `-` becomes `+` and the other way
    /// around, keeping the record order rule.
    pub fn inverted(&self) -> Self {
        let mut records: Vec<DiffRecord<K, V>> = self
            .records
            .iter()
            .map(|r| DiffRecord::new(r.sign.inverted(), r.key.clone(), r.value.clone()))
            .collect();
        records.sort_by(|a, b| a.key.cmp(&b.key).then(a.sign.cmp(&b.sign)));
        Self { records }
    }
}

/// Compute the structured diff between two maps.
///
/// Keys only in `left` yield `-`, keys only in `right` yield `+`, keys in
/// both yield ` ` when the values are equal and a `-`/`+` pair otherwise.
/// Neither input is modified.
pub fn diff_maps<K, V>(left: &BTreeMap<K, V>, right: &BTreeMap<K, V>) -> StructuredDiff<K, V>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let left_keys: Vec<&K> = left.keys().collect();
    let right_keys: Vec<&K> = right.keys().collect();
    let mut records = Vec::with_capacity(left.len().max(right.len()));

    for pair in correspond(&left_keys, &right_keys) {
        match pair {
            Correspondence::Both(key, _) => {
                let (old, new) = (&left[*key], &right[*key]);
                if old == new {
                    records.push(DiffRecord::new(Sign::Unchanged, (*key).clone(), old.clone()));
                } else {
                    records.push(DiffRecord::new(Sign::Removed, (*key).clone(), old.clone()));
                    records.push(DiffRecord::new(Sign::Added, (*key).clone(), new.clone()));
                }
            }
            Correspondence::LeftOnly(key) => {
                records.push(DiffRecord::new(Sign::Removed, (*key).clone(), left[*key].clone()));
            }
            Correspondence::RightOnly(key) => {
                records.push(DiffRecord::new(Sign::Added, (*key).clone(), right[*key].clone()));
            }
        }
    }

    StructuredDiff { records }
}
