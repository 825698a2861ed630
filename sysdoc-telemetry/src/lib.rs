//! Observability utilities for sysdoc.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support {
    //! Structured tracing helpers.

    use thiserror::Error;
    use tracing_subscriber::EnvFilter;

    /// Environment variable that overrides the configured log filter.
    pub const LOG_ENV: &str = "SYSDOC_LOG";

    /// Errors raised while installing the subscriber.
    #[derive(Debug, Error)]
    pub enum TelemetryError {
        /// The filter directive could not be parsed.
        #[error("invalid log filter `{directive}`: {reason}")]
        InvalidFilter {
            /// Directive that failed to parse.
            directive: String,
            /// Parser message.
            reason: String,
        },
        /// A global subscriber was already installed.
        #[error("tracing subscriber already installed")]
        AlreadyInstalled,
    }

    /// Resolves the effective filter: `SYSDOC_LOG` when set, otherwise
    /// `default_directive`.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidFilter`] when the chosen directive is
    /// malformed.
    pub fn filter(default_directive: &str) -> Result<EnvFilter, TelemetryError> {
        let directive = std::env::var(LOG_ENV).unwrap_or_else(|_| default_directive.to_owned());
        EnvFilter::try_new(&directive).map_err(|err| TelemetryError::InvalidFilter {
            directive,
            reason: err.to_string(),
        })
    }

    /// Installs a compact stderr subscriber as the global default.
    ///
    /// Output goes to stderr so that query results on stdout stay parseable.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] if the filter is malformed or a subscriber
    /// is already installed.
    pub fn init(default_directive: &str) -> Result<(), TelemetryError> {
        tracing_subscriber::fmt()
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .with_env_filter(filter(default_directive)?)
            .try_init()
            .map_err(|_| TelemetryError::AlreadyInstalled)
    }

}

pub use tracing_support::{LOG_ENV, TelemetryError, init};
