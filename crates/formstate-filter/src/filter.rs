//! Field-level change filter.
//!
//! [`filter_field_state`] compares the selected attributes of two snapshots
//! of the same field. It returns `None` when no selected attribute differs
//! and the call is not forced; otherwise it returns a [`FieldPatch`] holding
//! the field name and the new value of each differing (or, when forced, each
//! selected) attribute.
//!
//! # Invariants
//!
//! - `name` is never compared and is always copied from the new snapshot.
//! - The patch only reports selected attributes.
//! - Each attribute is compared on its own; absent equals only absent, and
//!   numbers compare by value.
//! - Neither snapshot is modified.

use serde_json::{Number, Value};
use tracing::{debug, trace, warn};

use formstate_types::{AttributeSelector, FieldPatch, FieldSnapshot, NAME_KEY};

use crate::config::{FilterConfig, NameCheck};
use crate::error::{FilterError, FilterResult};

/// Decide whether a field's selected attributes changed and build the patch.
///
/// With `force`, every selected attribute is reported with its new value even
/// if nothing differs, so the result is always `Some`.
pub fn filter_field_state(
    new: &FieldSnapshot,
    old: &FieldSnapshot,
    selector: &AttributeSelector,
    force: bool,
) -> Option<FieldPatch> {
    let patch = collect_changes(new, old, selector, force);
    if !force && patch.is_empty() {
        trace!(field = %new.name, "no selected attribute changed");
        return None;
    }

    debug!(
        field = %patch.name,
        attributes = patch.len(),
        force,
        "field state patch built"
    );
    Some(patch)
}

/// Compare two attribute values, where `None` is an absent attribute.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. Two integers
/// compare exactly, even past the range an `f64` represents. Every other
/// value compares with `Value`'s own equality.
pub fn values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => numbers_equal(x, y),
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    if x.is_f64() || y.is_f64() {
        return x.as_f64() == y.as_f64();
    }
    // a negative integer against one above i64::MAX
    false
}

/// Record the new value of every selected attribute that differs, or of
/// every selected attribute when forced.
fn collect_changes(
    new: &FieldSnapshot,
    old: &FieldSnapshot,
    selector: &AttributeSelector,
    force: bool,
) -> FieldPatch {
    let mut patch = FieldPatch::new(new.name.clone());
    for key in selector.selected().filter(|key| *key != NAME_KEY) {
        let next = new.get(key);
        if force || !values_equal(next, old.get(key)) {
            trace!(field = %new.name, attribute = key, "attribute reported");
            patch.record(key, next.cloned());
        }
    }
    patch
}

/// A filter bound to a [`FilterConfig`].
///
/// Unlike [`filter_field_state`], which trusts that both snapshots describe
/// the same field, this filter applies the configured [`NameCheck`].
#[derive(Clone, Debug, Default)]
pub struct FieldStateFilter {
    config: FilterConfig,
}

impl FieldStateFilter {
    /// Create a filter with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Apply the name check policy to a pair of snapshots.
    pub fn check_names(&self, new: &FieldSnapshot, old: &FieldSnapshot) -> FilterResult<()> {
        if new.name == old.name {
            return Ok(());
        }
        match self.config.name_check {
            NameCheck::Trust => Ok(()),
            NameCheck::Warn => {
                warn!(new = %new.name, old = %old.name, "snapshot names differ");
                Ok(())
            }
            NameCheck::Reject => Err(FilterError::NameMismatch {
                new: new.name.clone(),
                old: old.name.clone(),
            }),
        }
    }

    /// Filter a pair of snapshots, forcing if the configuration says so.
    pub fn filter(
        &self,
        new: &FieldSnapshot,
        old: &FieldSnapshot,
        selector: &AttributeSelector,
    ) -> FilterResult<Option<FieldPatch>> {
        self.check_names(new, old)?;
        Ok(filter_field_state(new, old, selector, self.config.force))
    }

    /// Filter a pair of snapshots, always producing a patch.
    pub fn filter_forced(
        &self,
        new: &FieldSnapshot,
        old: &FieldSnapshot,
        selector: &AttributeSelector,
    ) -> FilterResult<FieldPatch> {
        self.check_names(new, old)?;
        Ok(collect_changes(new, old, selector, true))
    }

    /// Filter two snapshots given as JSON values.
    pub fn filter_json(
        &self,
        new: Value,
        old: Value,
        selector: &AttributeSelector,
    ) -> FilterResult<Option<FieldPatch>> {
        let new = FieldSnapshot::from_value(new)?;
        let old = FieldSnapshot::from_value(old)?;
        self.filter(&new, &old, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formstate_types::TypeError;
    use serde_json::json;

    fn state() -> FieldSnapshot {
        FieldSnapshot::new("foo")
            .with("active", true)
            .with("dirty", false)
            .with("error", "dog")
            .with("initial", "initialValue")
            .with("invalid", false)
            .with("pristine", true)
            .with("touched", true)
            .with("valid", true)
            .with("value", "cat")
            .with("visited", true)
    }

    fn select(names: &[&str]) -> AttributeSelector {
        names.iter().copied().collect()
    }

    #[test]
    fn unchanged_value_is_filtered_out() {
        let s = state();
        assert_eq!(filter_field_state(&s, &s, &select(&["value"]), false), None);
    }

    #[test]
    fn changed_value_is_reported() {
        let old = state();
        let new = state().with("value", "whatever");
        let patch = filter_field_state(&new, &old, &select(&["value"]), false);
        assert_eq!(patch, Some(FieldPatch::new("foo").with("value", "whatever")));
    }

    #[test]
    fn forced_unchanged_value_is_reported() {
        let s = state();
        let patch = filter_field_state(&s, &s, &select(&["value"]), true);
        assert_eq!(patch, Some(FieldPatch::new("foo").with("value", "cat")));
    }

    #[test]
    fn changed_error_is_reported() {
        let old = state();
        let new = state().with("error", "rabbit");
        let patch = filter_field_state(&new, &old, &select(&["error"]), false);
        assert_eq!(patch, Some(FieldPatch::new("foo").with("error", "rabbit")));
    }

    #[test]
    fn unselected_changes_are_ignored() {
        let old = state();
        let new = state().with("active", false).with("dirty", true);
        let patch = filter_field_state(&new, &old, &select(&["active"]), false);
        assert_eq!(patch, Some(FieldPatch::new("foo").with("active", false)));
    }

    #[test]
    fn only_differing_attributes_are_reported() {
        let old = state();
        let new = state().with("value", "dog").with("dirty", true);
        let patch =
            filter_field_state(&new, &old, &select(&["value", "dirty", "touched"]), false).unwrap();
        assert_eq!(patch.keys().collect::<Vec<_>>(), vec!["dirty", "value"]);
    }

    #[test]
    fn empty_selector_reports_nothing_unless_forced() {
        let old = state();
        let new = state().with("value", "dog");
        let empty = AttributeSelector::new();
        assert_eq!(filter_field_state(&new, &old, &empty, false), None);
        assert_eq!(
            filter_field_state(&new, &old, &empty, true),
            Some(FieldPatch::new("foo"))
        );
    }

    #[test]
    fn absent_on_both_sides_is_equal() {
        let s = state();
        assert_eq!(filter_field_state(&s, &s, &select(&["data"]), false), None);
    }

    #[test]
    fn forced_absent_is_reported_as_absent() {
        let s = state();
        let patch = filter_field_state(&s, &s, &select(&["data"]), true).unwrap();
        assert_eq!(patch.get("data"), Some(None));
    }

    #[test]
    fn removed_attribute_is_reported_as_absent() {
        let old = state();
        let mut new = state();
        new.remove("error");
        let patch = filter_field_state(&new, &old, &select(&["error"]), false).unwrap();
        assert_eq!(patch.get("error"), Some(None));
    }

    #[test]
    fn null_differs_from_absent() {
        let old = state();
        let new = state().with("data", Value::Null);
        let patch = filter_field_state(&new, &old, &select(&["data"]), false).unwrap();
        assert_eq!(patch.get("data"), Some(Some(&Value::Null)));
    }

    #[test]
    fn name_is_never_compared() {
        let old = state();
        let mut new = state();
        new.name = "bar".into();
        assert_eq!(filter_field_state(&new, &old, &select(&["name"]), false), None);
    }

    #[test]
    fn patch_carries_new_name() {
        let old = state();
        let mut new = state().with("value", "dog");
        new.name = "bar".into();
        let patch = filter_field_state(&new, &old, &select(&["value"]), false).unwrap();
        assert_eq!(patch.name, "bar");
    }

    #[test]
    fn inputs_are_not_modified() {
        let old = state();
        let new = state().with("value", "dog");
        let (old_copy, new_copy) = (old.clone(), new.clone());
        let _ = filter_field_state(&new, &old, &AttributeSelector::all(), true);
        assert_eq!(old, old_copy);
        assert_eq!(new, new_copy);
    }

    #[test]
    fn configured_filter_trusts_by_default() {
        let filter = FieldStateFilter::default();
        let old = state();
        let mut new = state().with("value", "dog");
        new.name = "bar".into();
        let patch = filter.filter(&new, &old, &select(&["value"])).unwrap();
        assert_eq!(patch, Some(FieldPatch::new("bar").with("value", "dog")));
    }

    #[test]
    fn warn_mode_still_reports() {
        let filter = FieldStateFilter::new(FilterConfig {
            name_check: NameCheck::Warn,
            force: false,
        });
        let old = state();
        let mut new = state();
        new.name = "bar".into();
        assert_eq!(filter.filter(&new, &old, &select(&["value"])), Ok(None));
    }

    #[test]
    fn strict_filter_rejects_mismatched_names() {
        let filter = FieldStateFilter::new(FilterConfig::strict());
        let old = state();
        let mut new = state();
        new.name = "bar".into();
        let err = filter.filter(&new, &old, &select(&["value"])).unwrap_err();
        assert_eq!(
            err,
            FilterError::NameMismatch {
                new: "bar".into(),
                old: "foo".into(),
            }
        );
    }

    #[test]
    fn strict_filter_accepts_matching_names() {
        let filter = FieldStateFilter::new(FilterConfig::strict());
        let s = state();
        assert_eq!(filter.filter(&s, &s, &select(&["value"])), Ok(None));
    }

    #[test]
    fn configured_force_is_applied() {
        let filter = FieldStateFilter::new(FilterConfig {
            force: true,
            ..Default::default()
        });
        let s = state();
        let patch = filter.filter(&s, &s, &select(&["touched"])).unwrap();
        assert_eq!(patch, Some(FieldPatch::new("foo").with("touched", true)));
    }

    #[test]
    fn filter_forced_always_yields_patch() {
        let filter = FieldStateFilter::default();
        let s = state();
        let patch = filter
            .filter_forced(&s, &s, &AttributeSelector::new())
            .unwrap();
        assert_eq!(patch, FieldPatch::new("foo"));
    }

    #[test]
    fn filter_forced_reports_unchanged_attributes() {
        let filter = FieldStateFilter::default();
        let s = state();
        let patch = filter
            .filter_forced(&s, &s, &select(&["dirty", "value"]))
            .unwrap();
        assert_eq!(
            patch,
            FieldPatch::new("foo").with("dirty", false).with("value", "cat")
        );
    }

    #[test]
    fn integer_and_float_with_same_value_are_equal() {
        let old = FieldSnapshot::from_json(r#"{"name": "foo", "value": 1}"#).unwrap();
        let new = FieldSnapshot::from_json(r#"{"name": "foo", "value": 1.0}"#).unwrap();
        assert_eq!(filter_field_state(&new, &old, &select(&["value"]), false), None);
    }

    #[test]
    fn integer_and_different_float_are_reported() {
        let old = FieldSnapshot::from_json(r#"{"name": "foo", "value": 1}"#).unwrap();
        let new = FieldSnapshot::from_json(r#"{"name": "foo", "value": 2.0}"#).unwrap();
        let patch = filter_field_state(&new, &old, &select(&["value"]), false);
        assert_eq!(patch, Some(FieldPatch::new("foo").with("value", 2.0)));
    }

    #[test]
    fn number_equality() {
        assert!(values_equal(Some(&json!(-3)), Some(&json!(-3.0))));
        assert!(values_equal(Some(&json!(0)), Some(&json!(-0.0))));
        assert!(values_equal(Some(&json!(u64::MAX)), Some(&json!(u64::MAX))));
        assert!(!values_equal(Some(&json!(u64::MAX)), Some(&json!(u64::MAX - 1))));
        assert!(!values_equal(Some(&json!(-1)), Some(&json!(u64::MAX))));
        assert!(!values_equal(Some(&json!(1)), Some(&json!("1"))));
        assert!(!values_equal(Some(&json!(1)), None));
        assert!(values_equal(None, None));
    }

    #[test]
    fn filter_json_parses_snapshots() {
        let filter = FieldStateFilter::default();
        let patch = filter
            .filter_json(
                json!({"name": "foo", "value": "dog"}),
                json!({"name": "foo", "value": "cat"}),
                &select(&["value"]),
            )
            .unwrap();
        assert_eq!(patch, Some(FieldPatch::new("foo").with("value", "dog")));
    }

    #[test]
    fn filter_json_reports_bad_snapshots() {
        let filter = FieldStateFilter::default();
        let err = filter
            .filter_json(json!({"value": 1}), json!({"name": "foo"}), &select(&["value"]))
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::Types(TypeError::InvalidSnapshot("missing `name`".into()))
        );
    }
}
