//! Configuration management for sysdoc.
//!
//! [`schema::InspectorConfig`] names one JSON snapshot per registry kind;
//! [`loader::SnapshotLoader`] turns those files into registries on demand.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::{Snapshot, SnapshotLoader};
pub use schema::{ConfigError, ConfigResult, InspectorConfig, RegistryPaths};
