use serde::{Deserialize, Serialize};

/// What a configured filter does when the two snapshots carry different names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCheck {
    /// Do not compare names; the new snapshot's name is reported.
    #[default]
    Trust,
    /// Report as with `Trust`, but log a warning.
    Warn,
    /// Fail with [`FilterError::NameMismatch`](crate::FilterError::NameMismatch).
    Reject,
}

/// Configuration for a [`FieldStateFilter`](crate::FieldStateFilter).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Policy for snapshots whose names differ.
    pub name_check: NameCheck,
    /// Report every selected attribute, changed or not.
    pub force: bool,
}

impl FilterConfig {
    /// A configuration that rejects snapshots of different fields.
    pub fn strict() -> Self {
        Self {
            name_check: NameCheck::Reject,
            ..Default::default()
        }
    }
}
