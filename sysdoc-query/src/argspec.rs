//! Argument-specification reports.

use std::collections::BTreeMap;

use sysdoc_registry::{Registry, Signature};

use crate::matcher::{MatchMode, PatternError, PatternMatcher};

/// Argument specifications keyed by qualified name.
pub type SignatureMap = BTreeMap<String, Signature>;

/// Produces argument-specification reports for a registry.
///
/// Unlike the other queries this one takes at most a single pattern.
pub trait SignatureReporter: Send + Sync {
    /// Reports signatures of the entries selected by `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if `pattern` cannot be compiled.
    fn report(&self, registry: &Registry, pattern: Option<&str>) -> Result<SignatureMap, PatternError>;
}

impl<F> SignatureReporter for F
where
    F: Send + Sync + Fn(&Registry, Option<&str>) -> Result<SignatureMap, PatternError>,
{
    fn report(&self, registry: &Registry, pattern: Option<&str>) -> Result<SignatureMap, PatternError> {
        (self)(registry, pattern)
    }
}

/// Default reporter.
///
/// A missing or empty pattern reports every entry. Otherwise a glob selects by
/// wildcard and a plain name selects that name plus everything under
/// `name.`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArgspecReport;

impl SignatureReporter for ArgspecReport {
    fn report(&self, registry: &Registry, pattern: Option<&str>) -> Result<SignatureMap, PatternError> {
        let matcher = match pattern.filter(|pattern| !pattern.is_empty()) {
            Some(pattern) => Some(PatternMatcher::compile(pattern, MatchMode::Doc)?),
            None => None,
        };

        Ok(registry
            .entries()
            .filter(|entry| {
                matcher
                    .as_ref()
                    .is_none_or(|matcher| matcher.is_match(entry.name().as_str()))
            })
            .map(|entry| (entry.name().as_str().to_owned(), entry.signature().clone()))
            .collect())
    }
}
