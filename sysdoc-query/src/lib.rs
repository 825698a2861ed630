//! Introspection queries over function registries.
//!
//! Every query follows the same flow: caller patterns are matched against a
//! registry's qualified names ([`matcher`]), then the matched names are
//! post-processed into module names ([`modules`]), documentation
//! ([`docs`]) or argument specifications ([`argspec`]). [`Inspector`] binds
//! the flow to a [`sysdoc_registry::RegistryLoader`] and the two formatting
//! collaborators.

#![warn(missing_docs, clippy::pedantic)]

pub mod argspec;
pub mod docs;
pub mod inspector;
pub mod matcher;
pub mod modules;
pub mod query;

pub use argspec::{ArgspecReport, SignatureMap, SignatureReporter};
pub use docs::{DocMap, DocNormalizer, Passthrough, RstStripper};
pub use inspector::{Inspector, QueryError, QueryResult};
pub use matcher::{MatchMode, PatternError, PatternMatcher, Selection};
pub use modules::{modules_of, owners_of};
pub use query::Report;
