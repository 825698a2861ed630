//! Contract for supplying registry snapshots.

use std::collections::BTreeMap;
use std::path::PathBuf;

use sysdoc_primitives::RegistryKind;
use thiserror::Error;
use tracing::debug;

use crate::registry::{Registry, RegistryError};

/// Result alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Supplies a fresh registry snapshot for a registry kind.
///
/// Each call returns an owned snapshot; callers never share one across
/// queries.
pub trait RegistryLoader: Send + Sync {
    /// Loads the current registry for `kind`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when no registry can be supplied.
    fn load(&self, kind: RegistryKind) -> LoadResult<Registry>;
}

impl<L> RegistryLoader for &L
where
    L: RegistryLoader + ?Sized,
{
    fn load(&self, kind: RegistryKind) -> LoadResult<Registry> {
        (**self).load(kind)
    }
}

/// Loader backed by registries built ahead of time.
#[derive(Debug, Default, Clone)]
pub struct StaticLoader {
    registries: BTreeMap<RegistryKind, Registry>,
}

impl StaticLoader {
    /// Creates a loader with no registries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the registry for its kind.
    #[must_use]
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registries.insert(registry.kind(), registry);
        self
    }
}

impl RegistryLoader for StaticLoader {
    fn load(&self, kind: RegistryKind) -> LoadResult<Registry> {
        let registry = self
            .registries
            .get(&kind)
            .cloned()
            .ok_or(LoadError::Unavailable { kind })?;
        debug!(%kind, entries = registry.len(), "static registry snapshot");
        Ok(registry)
    }
}

/// Errors raised by registry loaders.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No registry is configured for the requested kind.
    #[error("no {kind} registry is available")]
    Unavailable {
        /// Requested registry kind.
        kind: RegistryKind,
    },

    /// A snapshot declared a different kind than the one requested.
    #[error("snapshot declares a {found} registry but {expected} was requested")]
    KindMismatch {
        /// Requested registry kind.
        expected: RegistryKind,
        /// Kind declared by the snapshot.
        found: RegistryKind,
    },

    /// Snapshot source could not be read.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        /// Snapshot location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Snapshot source was not a valid snapshot document.
    #[error("failed to decode snapshot {path}: {source}")]
    Decode {
        /// Snapshot location.
        path: PathBuf,
        /// Underlying decoding failure.
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot entries did not form a valid registry.
    #[error("invalid {kind} snapshot: {source}")]
    Invalid {
        /// Registry kind being built.
        kind: RegistryKind,
        /// Construction failure.
        #[source]
        source: RegistryError,
    },
}
