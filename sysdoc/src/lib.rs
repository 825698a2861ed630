//! Registry introspection facade.
//!
//! Bundles the sysdoc crates behind feature flags so embedders can pull in
//! only the query engine, or the engine plus file-based configuration and
//! logging setup.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use sysdoc_primitives as primitives;

/// Registry snapshots and the loader contract.
pub use sysdoc_registry as registry;

/// Name matching and aggregation queries (enabled by `query` feature).
#[cfg(feature = "query")]
pub use sysdoc_query as query;

/// Configuration and snapshot-file loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use sysdoc_config as config;

/// Logging setup (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use sysdoc_telemetry as telemetry;

pub use sysdoc_primitives::{QualifiedName, RegistryKind};
pub use sysdoc_registry::{Entry, Registry, RegistryLoader, Signature};

#[cfg(feature = "query")]
pub use sysdoc_query::{Inspector, Report};
