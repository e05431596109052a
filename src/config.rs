//! User configuration loaded from `config.toml`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::app::Mode;
use crate::history::default_history_path;

/// Environment variables checked, in order, when no key is configured.
const DEFAULT_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mode the calculator starts in.
    pub default_mode: Mode,
    pub history: HistoryConfig,
    pub ai: AiConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Persist history between runs.
    pub enabled: bool,
    /// Override for the history file location.
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl HistoryConfig {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_history_path)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AiConfig {
    pub model: String,
    /// API key. Prefer the environment; this is for setups without one.
    pub api_key: Option<String>,
    /// Environment variable holding the key, instead of the defaults.
    pub api_key_env: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            api_key_env: None,
            max_tokens: 1024,
            temperature: 0.2,
        }
    }
}

impl AiConfig {
    /// The API key from config, or else from the environment.
    ///
    /// Checks `api_key`, then `api_key_env` if set, otherwise
    /// `GEMINI_API_KEY` followed by `API_KEY`. Empty values are skipped.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Some(key.clone());
        }

        let vars: Vec<&str> = match &self.api_key_env {
            Some(name) => vec![name.as_str()],
            None => DEFAULT_KEY_VARS.to_vec(),
        };
        vars.into_iter()
            .filter_map(|name| env::var(name).ok())
            .find(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Default config file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("omnicalc")
            .join("config.toml")
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one, the
    /// default location is used and a missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::parse(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
