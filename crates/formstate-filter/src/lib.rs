//! Field state filter for formstate.
//!
//! Given the previous and next snapshot of a form field and the attributes a
//! subscriber tracks, decides whether the subscriber must be notified and, if
//! so, builds the patch describing what changed.
//!
//! # Key Types
//!
//! - [`filter_field_state`] -- The total, stateless filter
//! - [`FieldStateFilter`] / [`FilterConfig`] -- Configured filter with a name check policy
//! - [`FilterError`] -- Failures of the configured filter

pub mod config;
pub mod error;
pub mod filter;

pub use config::{FilterConfig, NameCheck};
pub use error::{FilterError, FilterResult};
pub use filter::{filter_field_state, values_equal, FieldStateFilter};
