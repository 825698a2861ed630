//! Core shared types for registry introspection.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod kind;
mod name;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// The five registry families that can be queried.
pub use kind::RegistryKind;
/// Dotted `module.function` identifiers.
pub use name::QualifiedName;
