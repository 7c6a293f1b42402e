//! Payload validation for the products module.
//!
//! The update schema is derived from the create schema by `partial()`, so the
//! two can never drift apart rule-by-rule.

use catalog_schema::{Document, Field, Issue, Schema};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{ProductInput, ProductUpdateInput};

static CREATE_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new()
        .field(Field::text("name").min_chars(3, "Name must be at least 3 characters"))
        .field(Field::number("price").greater_than(0.0, "Price must be greater than 0"))
        .field(Field::text("category").min_chars(1, "Category is required"))
        .field(Field::number("stock").at_least(0.0, "Stock must be zero or more"))
        .field(Field::boolean("isDeleted").default_value(false))
});

static UPDATE_SCHEMA: Lazy<Schema> = Lazy::new(|| CREATE_SCHEMA.partial());

/// Validate a creation payload into its typed form.
pub fn validate_create(raw: &Value) -> Result<ProductInput, Vec<Issue>> {
    typed(CREATE_SCHEMA.validate(raw)?)
}

/// Validate a partial update payload; absent fields are never an error.
pub fn validate_update(raw: &Value) -> Result<ProductUpdateInput, Vec<Issue>> {
    typed(UPDATE_SCHEMA.validate(raw)?)
}

/// Deserialize a cleaned document into its typed struct.
///
/// The schemas guarantee the shape, so a mismatch here is a programming
/// fault; it degrades to a root issue instead of panicking.
fn typed<T: DeserializeOwned>(document: Document) -> Result<T, Vec<Issue>> {
    serde_json::from_value(Value::Object(document)).map_err(|err| vec![Issue::root(err.to_string())])
}
