//! HTTP handlers for the products module.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use catalog_http::{error::AppError, extract::Body};
use catalog_store::{Document, DocumentStore};
use serde_json::{json, Value};

use super::validation::{validate_create, validate_update};

/// Collection this module owns in the document store.
pub(crate) const PRODUCTS: &str = "products";

#[derive(Clone)]
pub(crate) struct ProductsState {
    store: Arc<DocumentStore>,
}

pub(crate) fn router(store: Arc<DocumentStore>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product).patch(update_product))
        .with_state(ProductsState { store })
}

/// List products that are not soft-deleted, newest first.
async fn list_products(
    State(state): State<ProductsState>,
) -> Result<Json<Vec<Document>>, AppError> {
    let mut products = state.store.find(PRODUCTS, |doc| {
        !matches!(doc.get("isDeleted"), Some(Value::Bool(true)))
    })?;
    products.reverse();
    Ok(Json(products))
}

/// Fetch a single product by id. Soft-deleted documents are still returned.
async fn get_product(
    State(state): State<ProductsState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    match state.store.get(PRODUCTS, &id)? {
        Some(product) => Ok(Json(product).into_response()),
        None => Ok(not_found_response()),
    }
}

/// Validate and persist a new product.
async fn create_product(
    State(state): State<ProductsState>,
    Body(payload): Body<Value>,
) -> Result<Response, AppError> {
    let input = validate_create(&payload).map_err(AppError::validation)?;
    let saved = state.store.insert(PRODUCTS, to_document(&input)?)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({"message": "Product created", "saved": saved})),
    )
        .into_response())
}

/// Validated partial update; absent fields keep their stored values.
/// Soft delete is `{"isDeleted": true}` through this route.
async fn update_product(
    State(state): State<ProductsState>,
    Path(id): Path<String>,
    Body(payload): Body<Value>,
) -> Result<Response, AppError> {
    let patch = validate_update(&payload).map_err(AppError::validation)?;
    match state.store.update(PRODUCTS, &id, to_document(&patch)?)? {
        Some(product) => Ok(Json(product).into_response()),
        None => Ok(not_found_response()),
    }
}

/// Not-found responses carry a bare `errors` array without a `message` key.
fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"errors": ["Product not found"]})),
    )
        .into_response()
}

/// Serialize a validated payload into a store document.
fn to_document<T: serde::Serialize>(input: &T) -> Result<Document, AppError> {
    match serde_json::to_value(input)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Internal(anyhow::anyhow!(
            "payload serialized to a non-object value"
        ))),
    }
}
