use std::collections::BTreeMap;

use thiserror::Error;

/// Failures raised by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("collection '{0}' is already registered")]
    CollectionExists(String),

    #[error("collection '{0}' is not registered")]
    UnknownCollection(String),

    /// Field-level document validation failure; one message per field.
    #[error("document validation failed")]
    Validation { fields: BTreeMap<String, String> },

    /// The supplied identifier cannot be interpreted as a document id.
    #[error("Cast to DocumentId failed for value '{0}'")]
    InvalidId(String),
}
