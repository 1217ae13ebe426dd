//! Optional TOML configuration.
//!
//! ```toml
//! [knowledge_base]
//! health = "kb/health.kb"
//! pizza = "kb/pizza.kb"
//!
//! [log]
//! filter = "advisor=debug"
//! ```
//!
//! Read from `--config <path>`, or from `advisor.toml` in the working
//! directory when that file exists. Every section is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub(crate) const DEFAULT_CONFIG_FILE: &str = "advisor.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// `[knowledge_base]`: replacement sources for the built-in names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct KnowledgeBaseConfig {
    pub health: Option<PathBuf>,
    pub pizza: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct LogConfig {
    /// `EnvFilter` directives, used when `ADVISOR_LOG` is not set.
    pub filter: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Configured source for a built-in knowledge-base name.
    pub fn knowledge_base_path(&self, name: &str) -> Option<&Path> {
        match name {
            "health" => self.knowledge_base.health.as_deref(),
            "pizza" => self.knowledge_base.pizza.as_deref(),
            _ => None,
        }
    }
}

pub(crate) fn parse_config(src: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(src).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the explicit config file, else the default one if present, else
/// an empty config.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(Config::default());
            }
            default
        }
    };
    let src = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&src, &path)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
