use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::attributes::NAME_KEY;
use crate::error::{TypeError, TypeResult};

/// A complete read of one form field's observable state at one instant.
///
/// The attribute set is open-ended: any key other than `name` is an
/// attribute. A key missing from `attributes` is absent, which is distinct
/// from an attribute holding `null`.
///
/// Serializes as a single flat object: `{"name": "foo", "value": "cat", ...}`.
/// The attribute map never holds a `name` key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// The field identifier.
    pub name: String,
    #[serde(flatten)]
    pub(crate) attributes: BTreeMap<String, Value>,
}

impl FieldSnapshot {
    /// Create a snapshot with no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Build a snapshot from a name and an attribute map.
    ///
    /// A `name` entry in the map is dropped; the `name` argument wins.
    pub fn from_parts(name: impl Into<String>, mut attributes: BTreeMap<String, Value>) -> Self {
        attributes.remove(NAME_KEY);
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Builder form of [`set`](Self::set).
    ///
    /// A non-string `name` is rejected by `set` and leaves the snapshot as is.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.set(key, value);
        self
    }

    /// Set an attribute, returning its previous value.
    ///
    /// Setting `name` renames the field and requires a string, as in
    /// [`from_value`](Self::from_value).
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> TypeResult<Option<Value>> {
        let key = key.into();
        let value = value.into();
        if key != NAME_KEY {
            return Ok(self.attributes.insert(key, value));
        }
        match value {
            Value::String(name) => {
                let previous = std::mem::replace(&mut self.name, name);
                Ok(Some(Value::String(previous)))
            }
            other => Err(TypeError::InvalidSnapshot(format!(
                "`name` must be a string, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Remove an attribute, making it absent.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// The value of an attribute, or `None` if it is absent.
    ///
    /// `name` is not an attribute and always yields `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Every attribute except `name`, in key order.
    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Returns `true` if the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Parse a snapshot from a JSON value.
    ///
    /// The value must be an object with a string `name`.
    pub fn from_value(value: Value) -> TypeResult<Self> {
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(TypeError::InvalidSnapshot(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };
        let mut attributes: BTreeMap<String, Value> = map.into_iter().collect();
        let name = match attributes.remove(NAME_KEY) {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(TypeError::InvalidSnapshot(format!(
                    "`name` must be a string, got {}",
                    json_kind(&other)
                )))
            }
            None => return Err(TypeError::InvalidSnapshot("missing `name`".into())),
        };
        Ok(Self { name, attributes })
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> TypeResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
