//! Declarative payload validation.
//!
//! A [`Schema`] is an ordered list of per-field rule records: a coercion
//! target ([`Kind`]), a presence policy, and range/length [`Constraint`]s.
//! Validation walks every field independently, collects every failure as an
//! [`Issue`], and on success yields a cleaned document holding only the
//! declared fields with coerced values. [`Schema::partial`] derives the
//! all-optional variant used for update payloads.

pub mod field;
pub mod issue;
pub mod schema;

pub use field::{Check, Constraint, Field, Kind};
pub use issue::Issue;
pub use schema::{Document, Schema};
