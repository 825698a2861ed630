//! Qualified `module.function` names.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A registry key of the form `module.function`.
///
/// Bare names without a dot are accepted. Module listings skip them, except in
/// registries where each bare name stands for its own module.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Creates a qualified name after validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQualifiedName`] if the name is empty, contains
    /// whitespace, or has an empty module segment.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the module segment, or `None` for a bare name.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.0.split_once('.').map(|(module, _)| module)
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.0
    }
}

fn validate(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidQualifiedName {
            name: String::new(),
            reason: "name cannot be empty".into(),
        });
    }

    if name.starts_with('.') {
        return Err(Error::InvalidQualifiedName {
            name: name.into(),
            reason: "module segment cannot be empty".into(),
        });
    }

    if name.chars().any(char::is_whitespace) {
        return Err(Error::InvalidQualifiedName {
            name: name.into(),
            reason: "name cannot contain whitespace".into(),
        });
    }

    Ok(())
}
