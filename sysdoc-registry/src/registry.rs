//! Read-only registry snapshots keyed by qualified name.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry as Slot;

use serde::{Deserialize, Serialize};
use sysdoc_primitives::{QualifiedName, RegistryKind};
use thiserror::Error;

use crate::signature::Signature;

/// Result alias for registry construction.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Metadata describing one registered function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    name: QualifiedName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    module_doc: Option<String>,
    #[serde(default)]
    signature: Signature,
}

impl Entry {
    /// Creates an entry for the supplied qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if the name fails validation.
    pub fn new(name: impl Into<String>) -> RegistryResult<Self> {
        Ok(Self {
            name: QualifiedName::new(name)?,
            doc: None,
            module_doc: None,
            signature: Signature::default(),
        })
    }

    /// Sets the function's own documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets documentation attached to the owning module as a whole.
    #[must_use]
    pub fn with_module_doc(mut self, doc: impl Into<String>) -> Self {
        self.module_doc = Some(doc.into());
        self
    }

    /// Sets the argument specification.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = signature;
        self
    }

    /// Returns the qualified name.
    #[must_use]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Returns the function documentation, if any.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Returns the owning module's documentation, if any.
    #[must_use]
    pub fn module_doc(&self) -> Option<&str> {
        self.module_doc.as_deref()
    }

    /// Returns the argument specification.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Snapshot of one registry kind.
///
/// Built once through [`RegistryBuilder`] and only read afterwards.
#[derive(Clone, Debug)]
pub struct Registry {
    kind: RegistryKind,
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Starts building a registry of the supplied kind.
    #[must_use]
    pub fn builder(kind: RegistryKind) -> RegistryBuilder {
        RegistryBuilder {
            kind,
            entries: BTreeMap::new(),
        }
    }

    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty(kind: RegistryKind) -> Self {
        Self::builder(kind).build()
    }

    /// Returns the registry kind.
    #[must_use]
    pub const fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Returns the entry registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Iterates over qualified names in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over entries in ascending name order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.values()
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`Registry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    kind: RegistryKind,
    entries: BTreeMap<String, Entry>,
}

impl RegistryBuilder {
    /// Adds an entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEntry`] if the name is already present.
    pub fn insert(&mut self, entry: Entry) -> RegistryResult<()> {
        match self.entries.entry(entry.name().as_str().to_owned()) {
            Slot::Occupied(slot) => Err(RegistryError::DuplicateEntry {
                kind: self.kind,
                name: slot.key().clone(),
            }),
            Slot::Vacant(slot) => {
                slot.insert(entry);
                Ok(())
            }
        }
    }

    /// Adds an entry, consuming and returning the builder.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateEntry`] if the name is already present.
    pub fn entry(mut self, entry: Entry) -> RegistryResult<Self> {
        self.insert(entry)?;
        Ok(self)
    }

    /// Finalises the snapshot.
    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            kind: self.kind,
            entries: self.entries,
        }
    }
}

/// Errors produced while building a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Entry name failed validation.
    #[error(transparent)]
    InvalidName(#[from] sysdoc_primitives::Error),

    /// Entry name collided with an existing registration.
    #[error("{kind} registry already contains `{name}`")]
    DuplicateEntry {
        /// Registry the collision happened in.
        kind: RegistryKind,
        /// Name of the offending entry.
        name: String,
    },
}
