//! Queries over a single registry snapshot.

use sysdoc_registry::Registry;

use crate::docs::{self, DocMap};
use crate::matcher::{self, MatchMode, PatternError};
use crate::modules::{modules_of, owners_of};

/// Query output together with the patterns that were rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct Report<T> {
    value: T,
    rejected: Vec<PatternError>,
}

impl<T> Report<T> {
    /// Wraps a value produced from the accepted patterns.
    #[must_use]
    pub fn new(value: T, rejected: Vec<PatternError>) -> Self {
        Self { value, rejected }
    }

    /// The query output.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Patterns that failed to compile and contributed nothing.
    #[must_use]
    pub fn rejected(&self) -> &[PatternError] {
        &self.rejected
    }

    /// Whether every pattern was accepted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Discards rejections and returns the output.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Splits into output and rejections.
    #[must_use]
    pub fn into_parts(self) -> (T, Vec<PatternError>) {
        (self.value, self.rejected)
    }

    /// Transforms the output, keeping the rejections.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Report<U> {
        Report {
            value: f(self.value),
            rejected: self.rejected,
        }
    }
}

/// Qualified names matched by `patterns`; plain patterns match by raw prefix.
pub fn list_functions<S: AsRef<str>>(registry: &Registry, patterns: &[S]) -> Report<Vec<String>> {
    let (names, rejected) = matcher::select(registry.keys(), patterns, MatchMode::Prefix).into_parts();
    Report::new(names, rejected)
}

/// Module names owning the entries matched by `patterns`; every pattern is a
/// glob.
///
/// Registries keyed by bare names report each name as its own module.
pub fn list_modules<S: AsRef<str>>(registry: &Registry, patterns: &[S]) -> Report<Vec<String>> {
    let (names, rejected) = matcher::select(registry.keys(), patterns, MatchMode::Glob).into_parts();
    let modules = if registry.kind().lists_bare_names() {
        owners_of(names)
    } else {
        modules_of(names)
    };
    Report::new(modules, rejected)
}

/// Raw documentation of the entries matched by `patterns`; plain patterns
/// match by exact name or dot-safe prefix.
pub fn doc<S: AsRef<str>>(registry: &Registry, patterns: &[S]) -> Report<DocMap> {
    let (names, rejected) = matcher::select(registry.keys(), patterns, MatchMode::Doc).into_parts();
    Report::new(docs::docs_for(registry, names.as_slice()), rejected)
}
