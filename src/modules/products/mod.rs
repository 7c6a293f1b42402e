pub mod models;
pub mod routes;
pub mod validation;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use catalog_kernel::{InitCtx, Module};
use catalog_store::{CollectionSpec, DocField, DocumentRules, DocumentStore};

/// Products module: catalog CRUD over the document store.
pub struct ProductsModule;

impl ProductsModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for ProductsModule {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "products module initialized"
        );
        Ok(())
    }

    fn routes(&self, store: Arc<DocumentStore>) -> Router {
        routes::router(store)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List products",
                        "description": "Products that are not soft-deleted, newest first",
                        "tags": ["Products"],
                        "responses": {
                            "200": {
                                "description": "List of products",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Product"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a product",
                        "tags": ["Products"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/ProductInput"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Product created",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "message": {
                                                    "type": "string"
                                                },
                                                "saved": {
                                                    "$ref": "#/components/schemas/Product"
                                                }
                                            },
                                            "required": ["message", "saved"]
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Fetch a product",
                        "tags": ["Products"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {
                                    "type": "string"
                                }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "The product",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Product"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Malformed identifier",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Product not found"
                            }
                        }
                    },
                    "patch": {
                        "summary": "Update a product",
                        "description": "Partial update; soft delete by setting isDeleted to true",
                        "tags": ["Products"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {
                                    "type": "string"
                                }
                            }
                        ],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/ProductUpdateInput"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "The updated product",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Product"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Product not found"
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Product": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "description": "Store-assigned identifier"
                            },
                            "name": {
                                "type": "string"
                            },
                            "price": {
                                "type": "number"
                            },
                            "category": {
                                "type": "string"
                            },
                            "stock": {
                                "type": "number"
                            },
                            "isDeleted": {
                                "type": "boolean"
                            },
                            "createdAt": {
                                "type": "string",
                                "format": "date-time"
                            },
                            "updatedAt": {
                                "type": "string",
                                "format": "date-time"
                            }
                        },
                        "required": ["id", "name", "price", "category", "stock", "isDeleted", "createdAt", "updatedAt"]
                    },
                    "ProductInput": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "minLength": 3
                            },
                            "price": {
                                "type": "number",
                                "exclusiveMinimum": 0
                            },
                            "category": {
                                "type": "string",
                                "minLength": 1
                            },
                            "stock": {
                                "type": "number",
                                "minimum": 0
                            },
                            "isDeleted": {
                                "type": "boolean",
                                "default": false
                            }
                        },
                        "required": ["name", "price", "category", "stock"]
                    },
                    "ProductUpdateInput": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "minLength": 3
                            },
                            "price": {
                                "type": "number",
                                "exclusiveMinimum": 0
                            },
                            "category": {
                                "type": "string",
                                "minLength": 1
                            },
                            "stock": {
                                "type": "number",
                                "minimum": 0
                            },
                            "isDeleted": {
                                "type": "boolean"
                            }
                        }
                    }
                }
            }
        }))
    }

    fn collections(&self) -> Vec<CollectionSpec> {
        vec![products_collection()]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "products module stopped");
        Ok(())
    }
}

/// Store-side rules for the products collection.
///
/// The price floor is 0.01 here while the payload schema checks `> 0`; the
/// two layers are enforced independently.
fn products_collection() -> CollectionSpec {
    CollectionSpec::new(
        routes::PRODUCTS,
        DocumentRules::new()
            .field(
                DocField::text("name")
                    .required("Product name is required")
                    .min_chars(3, "Name must be at least 3 characters"),
            )
            .field(
                DocField::number("price")
                    .required("Price is required")
                    .min_number(0.01, "Price must be greater than 0"),
            )
            .field(DocField::text("category").required("Category is required"))
            .field(
                DocField::number("stock")
                    .required("Stock is required")
                    .min_number(0.0, "Stock cannot be negative"),
            )
            .field(DocField::boolean("isDeleted")),
    )
}

/// Create a new instance of the products module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(ProductsModule::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body as RawBody;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn module_router() -> Router {
        let store = Arc::new(DocumentStore::new());
        let module = ProductsModule::new();
        store
            .register(products_collection())
            .expect("collection registers");
        module.routes(store)
    }

    fn post_json(uri: &str, payload: &str) -> Request<RawBody> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(RawBody::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_serves_create_and_list() {
        let router = module_router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/",
                r#"{"name":"Walnut Desk","price":10,"category":"furniture","stock":1}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(Request::builder().uri("/").body(RawBody::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn router_rejects_malformed_json_with_bad_request() {
        let router = module_router();

        let response = router.oneshot(post_json("/", "{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn openapi_fragment_documents_the_crud_surface() {
        let spec = ProductsModule::new().openapi().expect("fragment exists");
        assert!(spec["paths"]["/"]["post"].is_object());
        assert!(spec["paths"]["/{id}"]["patch"].is_object());
        assert!(spec["components"]["schemas"]["Product"].is_object());
    }
}
