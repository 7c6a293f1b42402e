//! Request body extraction with normalized rejections.

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor whose rejection renders as an [`AppError`].
///
/// Axum's `Json` rejection is plain text; wrapping it keeps malformed
/// payloads on the same response shape as every other failure.
#[derive(Debug)]
pub struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::status(StatusCode::BAD_REQUEST, rejection.body_text(), vec![])
            })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body as RawBody;
    use axum::http::{header, Request as HttpRequest};

    fn json_request(payload: &'static str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(RawBody::from(payload))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_json_rejects_with_bad_request() {
        let rejection = Body::<serde_json::Value>::from_request(json_request("{not json"), &())
            .await
            .expect_err("malformed body is rejected");

        let (status, body) = rejection.normalize();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.message.is_empty());
        assert!(body.errors.is_empty());
    }

    #[tokio::test]
    async fn valid_json_passes_through() {
        let Body(value) =
            Body::<serde_json::Value>::from_request(json_request(r#"{"name":"lamp"}"#), &())
                .await
                .expect("valid body extracts");

        assert_eq!(value["name"], "lamp");
    }
}
