//! Shared error definitions for sysdoc primitives.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided registry kind label is not recognised.
    #[error("unknown registry kind `{label}`; expected one of execution, state, runner, returner, renderer")]
    UnknownRegistryKind {
        /// The offending label.
        label: String,
    },

    /// Qualified name failed validation.
    #[error("invalid qualified name `{name}`: {reason}")]
    InvalidQualifiedName {
        /// The offending name.
        name: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
