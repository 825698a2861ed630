//! Argument specifications attached to registry entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Positional and keyword parameter description of a registered function.
///
/// The structure is produced by whoever populated the registry; queries only
/// pass it through.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    defaults: Vec<Value>,
    #[serde(default)]
    varargs: Option<String>,
    #[serde(default)]
    kwargs: Option<String>,
}

impl Signature {
    /// Creates a signature with the supplied positional parameter names.
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets default values for the trailing positional parameters.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Vec<Value>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Names the variadic positional parameter.
    #[must_use]
    pub fn with_varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    /// Names the variadic keyword parameter.
    #[must_use]
    pub fn with_kwargs(mut self, name: impl Into<String>) -> Self {
        self.kwargs = Some(name.into());
        self
    }

    /// Positional parameter names.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Defaults for the trailing positional parameters.
    #[must_use]
    pub fn defaults(&self) -> &[Value] {
        &self.defaults
    }

    /// Variadic positional parameter name, if any.
    #[must_use]
    pub fn varargs(&self) -> Option<&str> {
        self.varargs.as_deref()
    }

    /// Variadic keyword parameter name, if any.
    #[must_use]
    pub fn kwargs(&self) -> Option<&str> {
        self.kwargs.as_deref()
    }
}
