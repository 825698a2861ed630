//! Registry snapshots and the loader contract.
//!
//! A [`registry::Registry`] is a flat, read-only mapping from qualified name
//! to [`registry::Entry`]. Registries are produced by a
//! [`loader::RegistryLoader`] once per query and discarded afterwards.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod registry;
pub mod signature;

pub use loader::{LoadError, LoadResult, RegistryLoader, StaticLoader};
pub use registry::{Entry, Registry, RegistryBuilder, RegistryError, RegistryResult};
pub use signature::Signature;
