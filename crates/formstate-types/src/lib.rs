//! Foundation types for formstate.
//!
//! This crate provides the data model shared by the filter and the CLI: a
//! point-in-time view of one form field, the set of attributes a subscriber
//! tracks, and the patch describing what changed between two views.
//!
//! # Key Types
//!
//! - [`FieldSnapshot`] — A field's `name` plus an open-ended map of attributes
//! - [`AttributeSelector`] — Attribute name to "tracked" flag
//! - [`FieldPatch`] — The field `name` plus the new value of each reported attribute
//! - [`FIELD_ATTRIBUTES`] — The standard attributes a form field exposes

pub mod attributes;
pub mod error;
pub mod patch;
pub mod selector;
pub mod snapshot;

pub use attributes::{is_standard_attribute, FIELD_ATTRIBUTES, NAME_KEY};
pub use error::{TypeError, TypeResult};
pub use patch::FieldPatch;
pub use selector::AttributeSelector;
pub use snapshot::FieldSnapshot;
