use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Validated creation payload for a product.
///
/// Numeric fields keep their JSON representation (`Number`, not `f64`) so a
/// payload that arrives as `3` is stored and echoed as `3`, never `3.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    /// Display name, trimmed
    pub name: String,
    /// Unit price; strictly positive
    pub price: Number,
    /// Free-form category label
    pub category: String,
    /// Units on hand; zero or more
    pub stock: Number,
    /// Soft-delete marker, defaulted to false at validation time
    pub is_deleted: bool,
}

/// Partial update payload; absent fields leave the stored document alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}
