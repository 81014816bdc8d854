//! The Atlas resource catalog core.
//!
//! Many independently stored, heterogeneous entity kinds — racks,
//! devices, tasks, workspaces — appear here as uniform, schema-described
//! catalog nodes with live change notification and bulk enumeration,
//! while each kind's storage stays fully decoupled from the catalog.
//!
//! The whole adapter exists exactly once, generically:
//!
//! - [`CatalogEntry`] — what a kind supplies: storage contract, display
//!   name, static schema
//! - [`Resource`] / [`Resource::project`] — the on-demand read-only view
//! - [`ChangeStream`] — per-commit, order-preserving change batches
//! - [`ResourceNexter`] — lazy, closeable enumeration
//! - [`KindAdapter`] — the one generic [`CatalogService`] implementation,
//!   registered per kind in an explicit [`Registry`]
//! - [`Writer`] — transactional create/delete keeping each entity's
//!   catalog node (via [`CatalogWriter`]) consistent with the entity
//!
//! This crate owns no threads and no locks of its own; isolation,
//! atomicity, and cancellation all come from the store it composes.

pub mod change;
pub mod entity;
pub mod error;
pub mod node;
pub mod nexter;
pub mod registry;
pub mod resource;
pub mod service;
pub mod writer;

#[cfg(test)]
pub(crate) mod testutil;

pub use change::{ChangeBatch, ChangeStream, ResourceChange};
pub use entity::CatalogEntry;
pub use error::{CatalogError, CatalogResult};
pub use nexter::ResourceNexter;
pub use node::{CatalogNode, CatalogWriter};
pub use registry::Registry;
pub use resource::Resource;
pub use service::{CatalogService, KindAdapter};
pub use writer::{CounterGenerator, FnKeyGenerator, KeyGenerator, UuidGenerator, Writer};
