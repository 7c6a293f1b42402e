use serde::Serialize;

/// A single field-level validation failure.
///
/// `path` locates the offending field as a dotted string (empty for the
/// payload root); `message` is the human-readable reason sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Failure attached to the payload as a whole rather than a named field.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new("", message)
    }
}
