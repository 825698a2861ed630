//! Registry loader backed by JSON snapshot files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sysdoc_primitives::RegistryKind;
use sysdoc_registry::{Entry, LoadError, LoadResult, Registry, RegistryLoader};
use tracing::info;

use crate::schema::{InspectorConfig, RegistryPaths};

/// On-disk form of one registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    kind: RegistryKind,
    #[serde(default)]
    entries: Vec<Entry>,
}

impl Snapshot {
    /// Creates a snapshot document.
    #[must_use]
    pub fn new(kind: RegistryKind, entries: Vec<Entry>) -> Self {
        Self { kind, entries }
    }

    /// Kind declared by the document.
    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Builds the registry described by the document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Invalid`] if two entries share a name.
    pub fn into_registry(self) -> LoadResult<Registry> {
        let kind = self.kind;
        let mut builder = Registry::builder(kind);
        for entry in self.entries {
            builder
                .insert(entry)
                .map_err(|source| LoadError::Invalid { kind, source })?;
        }
        Ok(builder.build())
    }
}

/// Reads the configured snapshot file each time a registry is requested.
#[derive(Clone, Debug, Default)]
pub struct SnapshotLoader {
    paths: RegistryPaths,
}

impl SnapshotLoader {
    /// Creates a loader over already resolved snapshot paths.
    #[must_use]
    pub fn new(paths: RegistryPaths) -> Self {
        Self { paths }
    }

    /// Creates a loader from configuration.
    #[must_use]
    pub fn from_config(config: &InspectorConfig) -> Self {
        Self::new(config.registries().clone())
    }

    fn read(kind: RegistryKind, path: &Path) -> LoadResult<Registry> {
        let raw = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        let snapshot: Snapshot = serde_json::from_slice(&raw).map_err(|source| LoadError::Decode {
            path: path.to_owned(),
            source,
        })?;
        if snapshot.kind() != kind {
            return Err(LoadError::KindMismatch {
                expected: kind,
                found: snapshot.kind(),
            });
        }
        let registry = snapshot.into_registry()?;
        info!(%kind, path = %path.display(), entries = registry.len(), "registry snapshot loaded");
        Ok(registry)
    }
}

impl RegistryLoader for SnapshotLoader {
    fn load(&self, kind: RegistryKind) -> LoadResult<Registry> {
        let path = self.paths.get(kind).ok_or(LoadError::Unavailable { kind })?;
        Self::read(kind, path)
    }
}
