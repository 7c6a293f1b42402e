use anyhow::Context;
use std::sync::Arc;

use catalog_store::DocumentStore;

use crate::module::{InitCtx, Module};

/// Module registry for managing module lifecycle
///
/// Modules are initialized and started in registration order and stopped
/// in reverse order.
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Register a module with the registry
    pub fn register(&mut self, module: Arc<dyn Module>) {
        self.modules.push(module);
    }

    /// Get all registered modules in registration order
    pub fn modules(&self) -> &[Arc<dyn Module>] {
        &self.modules
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules.iter().find(|module| module.name() == name)
    }

    /// Initialize all modules in registration order
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("initializing {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "initializing module");

            module
                .init(ctx)
                .await
                .with_context(|| format!("failed to initialize module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Register every module's document collections with the store
    pub fn register_collections(&self, store: &DocumentStore) -> anyhow::Result<()> {
        for module in &self.modules {
            for spec in module.collections() {
                tracing::info!(
                    module = module.name(),
                    collection = spec.name,
                    "registering collection"
                );

                store.register(spec).with_context(|| {
                    format!("failed to register collections for module '{}'", module.name())
                })?;
            }
        }

        Ok(())
    }

    /// Start all modules in registration order
    pub async fn start_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!("starting {} modules", self.modules.len());

        for module in &self.modules {
            tracing::info!(module = module.name(), "starting module");

            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop all modules in reverse registration order
    pub async fn stop_all(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} modules", self.modules.len());

        for module in self.modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping module");

            module
                .stop()
                .await
                .with_context(|| format!("failed to stop module '{}'", module.name()))?;
        }

        Ok(())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use catalog_store::{CollectionSpec, DocField, DocumentRules};

    struct TestModule {
        name: &'static str,
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn collections(&self) -> Vec<CollectionSpec> {
            vec![CollectionSpec::new(
                "widgets",
                DocumentRules::new().field(DocField::text("label").required("Label is required")),
            )]
        }
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty()); // No modules registered yet
    }

    #[test]
    fn test_get_module_by_name() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule { name: "widgets" }));

        assert!(registry.get_module("widgets").is_some());
        assert!(registry.get_module("gadgets").is_none());
    }

    #[tokio::test]
    async fn test_module_lifecycle() {
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let store = Arc::new(DocumentStore::new());
        let ctx = InitCtx {
            settings: &settings,
            store: &store,
        };

        // Register a test module
        let test_module = Arc::new(TestModule { name: "test" });
        registry.register(test_module);

        // These should not fail with the test module
        registry.init_all(&ctx).await.unwrap();
        registry.register_collections(&store).unwrap();
        registry.start_all(&ctx).await.unwrap();
        registry.stop_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_collection_registration_reaches_the_store() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(TestModule { name: "widgets" }));

        let store = Arc::new(DocumentStore::new());
        registry.register_collections(&store).unwrap();

        // The collection is usable once registered.
        let docs = store.find("widgets", |_| true).unwrap();
        assert!(docs.is_empty());

        // Registering the same collections again fails.
        assert!(registry.register_collections(&store).is_err());
    }
}
