//! In-memory document store collaborator.
//!
//! Collections are declared with [`DocumentRules`], a validation layer
//! applied to every write independent of whatever checks the application
//! performs up front, and hold flat JSON documents stamped with
//! `id`/`createdAt`/`updatedAt` metadata. Identifiers are UUIDs; anything
//! that does not parse as one is a cast failure.

pub mod error;
pub mod rules;
pub mod store;

pub use error::StoreError;
pub use rules::{CollectionSpec, DocField, DocumentRules, ValueKind};
pub use store::{Document, DocumentStore};
