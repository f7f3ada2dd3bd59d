//! YAML configuration: which datasets exist and how each is transformed

use crate::adapter::AdapterKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MuvinConfig {
    /// App used when none is named explicitly
    #[serde(default)]
    pub default_app: Option<String>,
    /// Directory for cached transform responses; caching is off when unset
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Transform per app name
    #[serde(default)]
    pub apps: BTreeMap<String, AdapterKind>,
}

impl MuvinConfig {
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// `$XDG_CONFIG_HOME/muvin/muvin.yaml` or the platform equivalent
    pub fn default_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
        config_dir.join("muvin").join("muvin.yaml")
    }

    /// The app to use: the requested one, the default, or the only one configured.
    pub fn resolve_app(&self, requested: Option<&str>) -> ConfigResult<String> {
        if let Some(name) = requested.or(self.default_app.as_deref()) {
            if !self.apps.contains_key(name) {
                return Err(ConfigError::Invalid(format!("unknown app '{}'", name)));
            }
            return Ok(name.to_string());
        }
        match self.apps.keys().collect::<Vec<_>>().as_slice() {
            [only] => Ok((*only).clone()),
            [] => Err(ConfigError::Invalid("no apps configured".to_string())),
            _ => Err(ConfigError::Invalid(
                "several apps configured; name one or set default_app".to_string(),
            )),
        }
    }

    fn validate(&self) -> ConfigResult<()> {
        if let Some(name) = &self.default_app {
            if !self.apps.contains_key(name) {
                return Err(ConfigError::Invalid(format!(
                    "default_app '{}' is not among the configured apps",
                    name
                )));
            }
        }
        Ok(())
    }
}
