//! Catalog Application Library
//!
//! Wires the feature modules, document store, and HTTP facade together.

pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use catalog_kernel::{InitCtx, ModuleRegistry, Settings};
use catalog_store::DocumentStore;

/// Run the application until the HTTP server exits.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(DocumentStore::new());

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        store: &store,
    };

    registry.init_all(&ctx).await?;
    registry
        .register_collections(&store)
        .context("failed to register module collections")?;
    registry.start_all(&ctx).await?;

    catalog_http::start_server(&registry, &settings, store).await?;

    registry.stop_all().await?;
    Ok(())
}
