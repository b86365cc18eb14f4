//! The change record delivered to a field's subscribers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::NAME_KEY;
use crate::snapshot::FieldSnapshot;

/// A partial field state: the field `name` plus the new value of every
/// reported attribute.
///
/// A `None` change means the attribute is absent from the new snapshot.
/// Serializes flat, with absent values written as `null`:
/// `{"name": "foo", "value": "whatever"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPatch {
    /// The field identifier, carried through unchanged.
    pub name: String,
    #[serde(flatten)]
    changes: BTreeMap<String, Option<Value>>,
}

impl FieldPatch {
    /// Create a patch with no changes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changes: BTreeMap::new(),
        }
    }

    /// Record the new value of an attribute. `name` is not an attribute and
    /// is ignored.
    pub fn record(&mut self, key: impl Into<String>, value: Option<Value>) {
        let key = key.into();
        if key != NAME_KEY {
            self.changes.insert(key, value);
        }
    }

    /// Builder form of [`record`](Self::record) for a present value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record(key, Some(value.into()));
        self
    }

    /// Returns `true` if no attribute is reported.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of reported attributes (excluding `name`).
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Returns `true` if the attribute is reported.
    pub fn contains(&self, key: &str) -> bool {
        self.changes.contains_key(key)
    }

    /// The reported new value. `None` if the attribute is not reported;
    /// `Some(None)` if it is reported as absent.
    pub fn get(&self, key: &str) -> Option<Option<&Value>> {
        self.changes.get(key).map(Option::as_ref)
    }

    /// Reported attribute names in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.changes.keys().map(String::as_str)
    }

    /// Reported attributes and their new values, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.changes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    /// Write every reported change into `snapshot`.
    ///
    /// Present values overwrite, absent values remove. The snapshot's name is
    /// left alone.
    pub fn apply_to(&self, snapshot: &mut FieldSnapshot) {
        for (key, value) in &self.changes {
            match value {
                Some(v) => {
                    snapshot.attributes.insert(key.clone(), v.clone());
                }
                None => {
                    snapshot.attributes.remove(key);
                }
            }
        }
    }
}
