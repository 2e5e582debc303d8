//! Demo configuration.
//!
//! Several real-world examples take a knob from "configuration" (which GUI
//! family to build, which decorators to stack, ...). The values live in a
//! TOML file; every field has a default so an empty file, or no file, works.
//!
//! ```toml
//! [abstract_factory]
//! os = "Mac"
//!
//! [decorator]
//! file = "salary.dat"
//! encryption = true
//! compression = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::behavioral::strategy::Action;

/// Environment variable that overrides `abstract_factory.os`.
pub const OS_ENV_VAR: &str = "PATTERNS_OS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbstractFactoryConfig {
    pub os: String,
}

impl Default for AbstractFactoryConfig {
    fn default() -> Self {
        Self {
            os: "Windows".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    pub file: String,
    pub encryption: bool,
    pub compression: bool,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            file: "salary.dat".to_string(),
            encryption: true,
            compression: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IteratorConfig {
    pub profile_id: String,
}

impl Default for IteratorConfig {
    fn default() -> Self {
        Self {
            profile_id: "user123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub need_reset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingletonConfig {
    pub values: Vec<String>,
}

impl Default for SingletonConfig {
    fn default() -> Self {
        Self {
            values: vec!["FOO".to_string(), "BAR".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub a: i64,
    pub b: i64,
    pub action: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            a: 6,
            b: 7,
            action: "multiplication".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub abstract_factory: AbstractFactoryConfig,
    pub decorator: DecoratorConfig,
    pub iterator: IteratorConfig,
    pub proxy: ProxyConfig,
    pub singleton: SingletonConfig,
    pub strategy: StrategyConfig,
}

impl CatalogConfig {
    /// Loads the config from `path`, or returns the defaults when no path is
    /// given. The result is validated either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                debug!(path = %path.display(), "loaded config file");
                Self::from_toml(&content)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Same as [`apply_env_overrides`](Self::apply_env_overrides) with an
    /// injectable lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(os) = lookup(OS_ENV_VAR) {
            debug!(os = %os, "abstract_factory.os overridden from environment");
            self.abstract_factory.os = os;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.singleton.values.is_empty() {
            return Err(ConfigError::Invalid {
                field: "singleton.values",
                reason: "at least one value is needed to spawn a thread".to_string(),
            });
        }
        if let Err(err) = self.strategy.action.parse::<Action>() {
            return Err(ConfigError::Invalid {
                field: "strategy.action",
                reason: err.to_string(),
            });
        }
        Ok(())
    }
}
