//! Entity kinds served by the Atlas catalog.
//!
//! Each module instantiates the generic catalog machinery for one kind:
//! the entity struct with its storage contract, the kind's schema
//! declaration, canonical-identifier helpers, and adapter/writer
//! constructors. The four kinds deliberately cover every key encoding:
//!
//! - [`rack`] — integer newtype key ([`rack::RackKey`])
//! - [`device`] — plain string key, rich attribute set
//! - [`task`] — 64-bit integer newtype key ([`task::TaskKey`])
//! - [`workspace`] — UUID key with server-side generation
//!
//! [`register_all`] wires every kind into a [`Registry`] at process
//! start; adding a kind is one module plus one line here.

use std::sync::Arc;

use atlas_catalog::Registry;
use atlas_store::MemoryStore;

pub mod device;
pub mod rack;
pub mod task;
pub mod workspace;

/// Register every kind's catalog adapter over the given store.
pub fn register_all(registry: &mut Registry, store: &Arc<MemoryStore>) {
    registry.register(Arc::new(rack::adapter(store.clone())));
    registry.register(Arc::new(device::adapter(store.clone())));
    registry.register(Arc::new(task::adapter(store.clone())));
    registry.register(Arc::new(workspace::adapter(store.clone())));
}
