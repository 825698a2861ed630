//! Strongly typed configuration schema.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sysdoc_primitives::RegistryKind;
use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file was not valid.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file location.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
}

fn default_log_filter() -> String {
    "warn".into()
}

/// Top-level configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InspectorConfig {
    #[serde(default = "default_log_filter")]
    log_filter: String,
    #[serde(default)]
    registries: RegistryPaths,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            registries: RegistryPaths::default(),
        }
    }
}

impl InspectorConfig {
    /// Reads configuration from a JSON file.
    ///
    /// Relative snapshot paths are resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] when the file
    /// cannot be read or decoded.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_json(&raw, base).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Parses configuration from JSON, resolving relative paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns the decoding error if `raw` is not a valid document.
    pub fn from_json(raw: &str, base: &Path) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.registries.resolve_against(base);
        Ok(config)
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Points a registry kind at a snapshot file.
    #[must_use]
    pub fn with_registry(mut self, kind: RegistryKind, path: impl Into<PathBuf>) -> Self {
        *self.registries.slot_mut(kind) = Some(path.into());
        self
    }

    /// Log filter directive used when no environment override is present.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Configured snapshot locations.
    #[must_use]
    pub fn registries(&self) -> &RegistryPaths {
        &self.registries
    }
}

/// Snapshot file per registry kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryPaths {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    execution: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    runner: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    returner: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    renderer: Option<PathBuf>,
}

impl RegistryPaths {
    /// Snapshot path configured for `kind`.
    #[must_use]
    pub fn get(&self, kind: RegistryKind) -> Option<&Path> {
        match kind {
            RegistryKind::Execution => self.execution.as_deref(),
            RegistryKind::State => self.state.as_deref(),
            RegistryKind::Runner => self.runner.as_deref(),
            RegistryKind::Returner => self.returner.as_deref(),
            RegistryKind::Renderer => self.renderer.as_deref(),
        }
    }

    fn slot_mut(&mut self, kind: RegistryKind) -> &mut Option<PathBuf> {
        match kind {
            RegistryKind::Execution => &mut self.execution,
            RegistryKind::State => &mut self.state,
            RegistryKind::Runner => &mut self.runner,
            RegistryKind::Returner => &mut self.returner,
            RegistryKind::Renderer => &mut self.renderer,
        }
    }

    fn resolve_against(&mut self, base: &Path) {
        for kind in RegistryKind::ALL {
            if let Some(path) = self.slot_mut(kind) {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn defaults_apply_to_empty_document() {
        let config = InspectorConfig::from_json("{}", Path::new("/etc/sysdoc")).unwrap();
        assert_eq!(config, InspectorConfig::default());
        assert_eq!(config.log_filter(), "warn");
        assert!(RegistryKind::ALL
            .into_iter()
            .all(|kind| config.registries().get(kind).is_none()));
    }

    #[test]
    fn relative_paths_resolve_against_base() {
        let raw = r#"{
            "log_filter": "debug",
            "registries": { "state": "snapshots/state.json", "runner": "/abs/runner.json" }
        }"#;
        let config = InspectorConfig::from_json(raw, Path::new("/etc/sysdoc")).unwrap();
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(
            config.registries().get(RegistryKind::State),
            Some(Path::new("/etc/sysdoc/snapshots/state.json"))
        );
        assert_eq!(
            config.registries().get(RegistryKind::Runner),
            Some(Path::new("/abs/runner.json"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = InspectorConfig::from_json(r#"{ "registries": { "grains": "g.json" } }"#, Path::new(""));
        assert!(err.is_err());
    }

    #[test]
    fn load_reads_file_next_to_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysdoc.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{ "registries": {{ "execution": "execution.json" }} }}"#).unwrap();

        let config = InspectorConfig::load(&path).unwrap();
        assert_eq!(
            config.registries().get(RegistryKind::Execution),
            Some(dir.path().join("execution.json").as_path())
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InspectorConfig::load(&dir.path().join("absent.json")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reports_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sysdoc.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = InspectorConfig::load(&path).expect_err("malformed");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn builder_sets_registry_paths() {
        let config = InspectorConfig::default()
            .with_log_filter("info")
            .with_registry(RegistryKind::Renderer, "/srv/renderers.json");
        assert_eq!(config.log_filter(), "info");
        assert_eq!(
            config.registries().get(RegistryKind::Renderer),
            Some(Path::new("/srv/renderers.json"))
        );
    }
}
