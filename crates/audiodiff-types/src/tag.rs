//! Normalized tag values.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized metadata of one audio file, keyed by a format-independent
/// vocabulary (`title`, `tracknumber`, `pictures`, ...).
pub type TagMap = BTreeMap<String, TagValue>;

/// A tag value: one scalar, or an ordered list for multi-valued tags.
///
/// `Scalar(x)` never equals `List([x])`. Readers unwrap single-element
/// lists with [`TagValue::from_values`] so both sides of a comparison agree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Scalar(String),
    List(Vec<String>),
}

impl TagValue {
    /// Build a value from every occurrence of a key, unwrapping a single
    /// occurrence into a scalar. Returns `None` for no occurrences.
    pub fn from_values(mut values: Vec<String>) -> Option<TagValue> {
        match values.len() {
            0 => None,
            1 => values.pop().map(TagValue::Scalar),
            _ => Some(TagValue::List(values)),
        }
    }

    /// Number of scalars held.
    pub fn len(&self) -> usize {
        match self {
            TagValue::Scalar(_) => 1,
            TagValue::List(items) => items.len(),
        }
    }

    /// Returns `true` for an empty list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Scalar(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Scalar(value)
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Scalar(s) => f.write_str(s),
            TagValue::List(items) => write!(f, "{:?}", items),
        }
    }
}
