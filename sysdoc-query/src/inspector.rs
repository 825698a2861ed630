//! Query façade binding a loader to the formatting collaborators.

use sysdoc_primitives::RegistryKind;
use sysdoc_registry::{LoadError, Registry, RegistryLoader};
use thiserror::Error;
use tracing::{debug, warn};

use crate::argspec::{ArgspecReport, SignatureMap, SignatureReporter};
use crate::docs::{DocMap, DocNormalizer, RstStripper};
use crate::query::{self, Report};

/// Result alias for façade queries.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors surfaced by façade queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The loader could not supply the requested registry.
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Answers introspection queries against any registry kind.
///
/// Each call takes a fresh snapshot from the loader, so concurrent callers
/// never share registry state.
#[derive(Debug, Clone)]
pub struct Inspector<L, N = RstStripper, R = ArgspecReport> {
    loader: L,
    normalizer: N,
    reporter: R,
}

impl<L> Inspector<L>
where
    L: RegistryLoader,
{
    /// Creates an inspector with the default collaborators.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            normalizer: RstStripper,
            reporter: ArgspecReport,
        }
    }
}

impl<L, N, R> Inspector<L, N, R>
where
    L: RegistryLoader,
    N: DocNormalizer,
    R: SignatureReporter,
{
    /// Replaces the documentation normaliser.
    #[must_use]
    pub fn with_normalizer<M: DocNormalizer>(self, normalizer: M) -> Inspector<L, M, R> {
        Inspector {
            loader: self.loader,
            normalizer,
            reporter: self.reporter,
        }
    }

    /// Replaces the signature reporter.
    #[must_use]
    pub fn with_reporter<P: SignatureReporter>(self, reporter: P) -> Inspector<L, N, P> {
        Inspector {
            loader: self.loader,
            normalizer: self.normalizer,
            reporter,
        }
    }

    /// Lists qualified function names.
    ///
    /// No patterns lists every function. Globs match full names; plain
    /// patterns match any name they prefix.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Load`] if the registry cannot be loaded.
    pub fn list_functions<S: AsRef<str>>(
        &self,
        kind: RegistryKind,
        patterns: &[S],
    ) -> QueryResult<Report<Vec<String>>> {
        let registry = self.snapshot(kind)?;
        let report = query::list_functions(&registry, patterns);
        trace_query(kind, "list_functions", patterns.len(), report.value().len(), &report);
        Ok(report)
    }

    /// Lists the modules owning matched functions.
    ///
    /// Every pattern is matched as a glob against full qualified names.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Load`] if the registry cannot be loaded.
    pub fn list_modules<S: AsRef<str>>(
        &self,
        kind: RegistryKind,
        patterns: &[S],
    ) -> QueryResult<Report<Vec<String>>> {
        let registry = self.snapshot(kind)?;
        let report = query::list_modules(&registry, patterns);
        trace_query(kind, "list_modules", patterns.len(), report.value().len(), &report);
        Ok(report)
    }

    /// Aggregates normalised documentation for matched functions.
    ///
    /// Plain patterns select an exact name or everything under `pattern.`;
    /// state registries also report each matched module's own documentation.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Load`] if the registry cannot be loaded.
    pub fn doc<S: AsRef<str>>(&self, kind: RegistryKind, patterns: &[S]) -> QueryResult<Report<DocMap>> {
        let registry = self.snapshot(kind)?;
        let report = query::doc(&registry, patterns);
        trace_query(kind, "doc", patterns.len(), report.value().len(), &report);
        Ok(report.map(|docs| self.normalizer.normalize(docs)))
    }

    /// Reports argument specifications, optionally narrowed by one pattern.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Load`] if the registry cannot be loaded.
    pub fn argspec(&self, kind: RegistryKind, pattern: Option<&str>) -> QueryResult<Report<SignatureMap>> {
        let registry = self.snapshot(kind)?;
        let report = match self.reporter.report(&registry, pattern) {
            Ok(signatures) => Report::new(signatures, Vec::new()),
            Err(err) => Report::new(SignatureMap::new(), vec![err]),
        };
        trace_query(kind, "argspec", usize::from(pattern.is_some()), report.value().len(), &report);
        Ok(report)
    }

    fn snapshot(&self, kind: RegistryKind) -> QueryResult<Registry> {
        self.loader.load(kind).map_err(|err| {
            warn!(%kind, %err, "registry unavailable");
            QueryError::from(err)
        })
    }
}

fn trace_query<T>(kind: RegistryKind, query: &str, patterns: usize, matched: usize, report: &Report<T>) {
    for err in report.rejected() {
        warn!(%kind, query, pattern = err.pattern(), reason = err.reason(), "pattern rejected");
    }
    debug!(%kind, query, patterns, matched, "registry query");
}
