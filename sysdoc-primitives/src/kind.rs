//! Registry kind identifiers.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifies one of the independently loaded function registries.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Execution module functions.
    Execution,
    /// State module functions.
    State,
    /// Runner functions.
    Runner,
    /// Returner functions.
    Returner,
    /// Renderer functions.
    Renderer,
}

impl RegistryKind {
    /// Every registry kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Execution,
        Self::State,
        Self::Runner,
        Self::Returner,
        Self::Renderer,
    ];

    /// Returns the lowercase label used in configuration and on the command line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Execution => "execution",
            Self::State => "state",
            Self::Runner => "runner",
            Self::Returner => "returner",
            Self::Renderer => "renderer",
        }
    }

    /// Whether entries of this kind carry documentation for their owning
    /// module in addition to their own.
    ///
    /// Only state modules do.
    #[must_use]
    pub const fn has_module_docs(self) -> bool {
        matches!(self, Self::State)
    }

    /// Whether entries of this kind are registered under bare names that
    /// stand for their own module.
    ///
    /// Renderers are keyed `jinja`, `yaml` and so on rather than `module.fn`.
    #[must_use]
    pub const fn lists_bare_names(self) -> bool {
        matches!(self, Self::Renderer)
    }
}

impl Display for RegistryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegistryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| Error::UnknownRegistryKind { label: s.into() })
    }
}
