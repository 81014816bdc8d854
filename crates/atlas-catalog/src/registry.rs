//! The process-wide kind registry.

use std::collections::HashMap;
use std::sync::Arc;

use atlas_store::Kv;
use atlas_types::CatalogId;
use tracing::info;

use crate::error::{CatalogError, CatalogResult};
use crate::resource::Resource;
use crate::service::CatalogService;

/// An explicit kind → service registry, constructed once at process start
/// and passed by reference to every consumer.
///
/// Exactly one service is registered per kind tag; registering a second
/// one is a startup bug and panics immediately.
#[derive(Default)]
pub struct Registry {
    services: HashMap<&'static str, Arc<dyn CatalogService>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a kind's service.
    ///
    /// # Panics
    ///
    /// Panics if a service is already registered for the kind tag.
    pub fn register(&mut self, service: Arc<dyn CatalogService>) {
        let kind = service.kind();
        let previous = self.services.insert(kind, service);
        assert!(
            previous.is_none(),
            "catalog service already registered for kind {kind:?}"
        );
        info!(kind, "catalog service registered");
    }

    /// Look up the service handling a kind tag.
    pub fn service(&self, kind: &str) -> Option<&Arc<dyn CatalogService>> {
        self.services.get(kind)
    }

    /// All registered kind tags, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.services.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Retrieve any kind's resource by canonical identifier.
    ///
    /// An unregistered kind reports not-found for the identifier, so
    /// callers branch on a single variant.
    pub fn retrieve_resource(
        &self,
        id: &CatalogId,
        tx: Option<&dyn Kv>,
    ) -> CatalogResult<Resource> {
        let service = self
            .service(&id.kind)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        service.retrieve_resource(&id.key, tx)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").field("kinds", &self.kinds()).finish()
    }
}
