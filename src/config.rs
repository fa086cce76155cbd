//! Configuration file support for prompt-explorer
//!
//! Reads from .prompt-explorer/config.toml, found by walking up from the
//! current directory. The API base URL can be overridden with
//! `PROMPT_EXPLORER_API_URL` or `--api-url`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
pub const API_URL_ENV: &str = "PROMPT_EXPLORER_API_URL";
pub const CONFIG_DIR: &str = ".prompt-explorer";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Prompt API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Tree assembly settings
    #[serde(default)]
    pub tree: TreeConfig,

    /// Log output for the interactive browser
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the prompt API
    /// Default: http://localhost:5001
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TreeConfig {
    /// How many prompts are hydrated at once during tree assembly
    /// Default: 8
    #[serde(default = "default_max_concurrent_hydrations")]
    pub max_concurrent_hydrations: usize,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct LogConfig {
    /// Append TUI logs here. When unset the TUI discards its logs.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_max_concurrent_hydrations() -> usize {
    8
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: None,
        }
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_concurrent_hydrations: default_max_concurrent_hydrations(),
        }
    }
}

impl Config {
    /// Load config from .prompt-explorer/config.toml above the current directory
    /// Returns default config if no file exists
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_config_path(&dir))
        {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find config.toml by walking up directory tree
    pub fn find_config_path(start: &Path) -> Option<PathBuf> {
        let mut dir = start;

        loop {
            let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
        None
    }

    /// Apply the environment and command line overrides for the API URL
    ///
    /// Precedence: `cli` > `env` > config file > default.
    pub fn with_overrides(mut self, env: Option<String>, cli: Option<String>) -> Self {
        let chosen = cli
            .into_iter()
            .chain(env)
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty());
        if let Some(url) = chosen {
            self.api.base_url = url;
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        self
    }

    /// Effective hydration concurrency, never below one
    pub fn hydration_limit(&self) -> usize {
        self.tree.max_concurrent_hydrations.max(1)
    }
}
