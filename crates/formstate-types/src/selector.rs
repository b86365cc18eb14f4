use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attributes::FIELD_ATTRIBUTES;

/// The attributes a subscriber tracks.
///
/// Maps attribute name to a flag; only names flagged `true` are selected.
/// Serializes transparently as `{"value": true, "error": false}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSelector(BTreeMap<String, bool>);

impl AttributeSelector {
    /// Create a selector that tracks nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select every standard field attribute.
    pub fn all() -> Self {
        FIELD_ATTRIBUTES.iter().copied().collect()
    }

    /// Builder form of [`select`](Self::select).
    pub fn with(mut self, name: impl Into<String>) -> Self {
        self.select(name);
        self
    }

    /// Mark an attribute as tracked.
    pub fn select(&mut self, name: impl Into<String>) {
        self.0.insert(name.into(), true);
    }

    /// Mark an attribute as untracked. The entry is kept with a `false` flag.
    pub fn deselect(&mut self, name: impl Into<String>) {
        self.0.insert(name.into(), false);
    }

    /// Returns `true` if the attribute is present and flagged.
    pub fn is_selected(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(false)
    }

    /// Selected attribute names in lexicographic order.
    pub fn selected(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .iter()
            .filter(|(_, flag)| **flag)
            .map(|(name, _)| name.as_str())
    }

    /// Number of selected attributes.
    pub fn len(&self) -> usize {
        self.selected().count()
    }

    /// Returns `true` if no attribute is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> FromIterator<&'a str> for AttributeSelector {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(|name| (name.to_owned(), true)).collect())
    }
}

impl FromIterator<String> for AttributeSelector {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().map(|name| (name, true)).collect())
    }
}

impl FromIterator<(String, bool)> for AttributeSelector {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, bool>> for AttributeSelector {
    fn from(flags: BTreeMap<String, bool>) -> Self {
        Self(flags)
    }
}
