//! Error handling for the catalog HTTP layer
//!
//! Every failure a handler can produce is a variant of [`AppError`], and
//! every variant renders through [`AppError::normalize`] into the same
//! `{message, errors}` body. Classification is by variant identity, never by
//! inspecting message text or probing for fields on the error value.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_schema::Issue;
use catalog_store::StoreError;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Standard error response format for all HTTP errors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub errors: Vec<Value>,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload rejected by a schema.
    #[error("payload validation failed with {} issue(s)", .0.len())]
    Validation(Vec<Issue>),

    /// Stored document rejected by its collection rules.
    #[error("document validation failed")]
    DocumentValidation(BTreeMap<String, String>),

    /// Resource identifier that did not parse.
    #[error("{0}")]
    InvalidId(String),

    /// Failure that arrives already carrying its response shape.
    #[error("{status}")]
    Status {
        status: StatusCode,
        message: Option<String>,
        errors: Vec<Value>,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error from schema issues
    pub fn validation(issues: Vec<Issue>) -> Self {
        Self::Validation(issues)
    }

    /// Create a pre-classified error with an explicit status and body
    pub fn status(status: StatusCode, message: impl Into<String>, errors: Vec<Value>) -> Self {
        Self::Status {
            status,
            message: Some(message.into()),
            errors,
        }
    }

    /// Flatten this error into its response status and body.
    ///
    /// Pure and deterministic: equal errors normalize to equal responses,
    /// and every variant produces a well-formed body.
    pub fn normalize(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Validation Error".to_string(),
                    errors: issues
                        .iter()
                        .map(|issue| json!({"path": issue.path, "message": issue.message}))
                        .collect(),
                },
            ),
            AppError::DocumentValidation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: "Validation Error".to_string(),
                    errors: fields
                        .values()
                        .map(|message| Value::String(message.clone()))
                        .collect(),
                },
            ),
            AppError::InvalidId(detail) => {
                let detail = if detail.is_empty() {
                    "Invalid resource identifier".to_string()
                } else {
                    detail.clone()
                };
                (
                    StatusCode::BAD_REQUEST,
                    ErrorBody {
                        message: "Invalid ID Format".to_string(),
                        errors: vec![Value::String(detail)],
                    },
                )
            }
            AppError::Status {
                status,
                message,
                errors,
            } => (
                *status,
                ErrorBody {
                    message: message
                        .as_deref()
                        .filter(|m| !m.is_empty())
                        .unwrap_or("Validation Error")
                        .to_string(),
                    errors: errors.clone(),
                },
            ),
            AppError::Internal(source) => {
                let detail = source.to_string();
                let detail = if detail.is_empty() {
                    "An unexpected error occurred".to_string()
                } else {
                    detail
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "Internal Server Error".to_string(),
                        errors: vec![Value::String(detail)],
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.normalize();

        tracing::error!(
            status_code = %status.as_u16(),
            message = %body.message,
            detail_count = body.errors.len(),
            "request error"
        );

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { fields } => Self::DocumentValidation(fields),
            cast @ StoreError::InvalidId(_) => Self::InvalidId(cast.to_string()),
            other => Self::Internal(other.into()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}
