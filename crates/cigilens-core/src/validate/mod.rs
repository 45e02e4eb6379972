//! Field-level validation framework.
//!
//! A [`ValidatedField`] pairs a decoded wire value with its post-validation
//! verdict; a [`Rule`] is the legality predicate attached to that field in
//! the layout registry. Rules are pure data: they never panic and never
//! return `Err`. Invalidity is recorded as `valid = false` plus a message,
//! so a malformed but correctly framed packet is still fully reported for
//! diagnosis instead of being discarded.

mod rule;
mod value;

pub use rule::Rule;
pub use value::{FieldValue, ValidatedField};
