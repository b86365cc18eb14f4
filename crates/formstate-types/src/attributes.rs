//! Well-known attribute names.

/// Key under which a field's identifier is stored. Never compared.
pub const NAME_KEY: &str = "name";

/// The standard attributes a form field exposes to subscribers, in
/// lexicographic order.
pub const FIELD_ATTRIBUTES: [&str; 10] = [
    "active", "dirty", "error", "initial", "invalid", "pristine", "touched", "valid", "value",
    "visited",
];

/// Returns `true` if `name` is one of [`FIELD_ATTRIBUTES`].
pub fn is_standard_attribute(name: &str) -> bool {
    FIELD_ATTRIBUTES.binary_search(&name).is_ok()
}
