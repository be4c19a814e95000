use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

// =============================================================================
// Defaults
// =============================================================================

/// Default number of images checked concurrently
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Default number of tags requested per registry page
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Default timeout for a single registry request in milliseconds (30 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default lifetime of cached tag lists in milliseconds (1 hour)
pub const DEFAULT_CACHE_TTL_MS: i64 = 60 * 60 * 1000;

const APP_NAME: &str = "tagwatch";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub concurrency: usize,
    pub registry: RegistryConfig,
    pub cache: CacheConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            registry: RegistryConfig::default(),
            cache: CacheConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Registry client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Tags requested per page of the tag list
    pub page_size: usize,
    /// Timeout for a single request in milliseconds
    pub timeout_ms: u64,
    /// Registry hosts (`host[:port]`) serving in place of a registry domain
    pub mirrors: HashMap<String, String>,
    /// Registry domains reached over plain HTTP
    pub insecure: HashSet<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            mirrors: HashMap::new(),
            insecure: HashSet::new(),
        }
    }
}

/// Tag cache configuration
///
/// The cache is off unless enabled: a cached list can miss tags pushed
/// during the last `ttl` milliseconds.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CacheConfig {
    pub enabled: bool,
    /// Lifetime of a cached tag list in milliseconds
    pub ttl: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl: DEFAULT_CACHE_TTL_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub format: LogFormat,
    /// Also write logs to [`log_path`]
    pub file: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Loads the configuration from `path`, or from [`config_path`] when no
    /// path is given. A missing default file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    debug!("No config file at {:?}, using defaults", path);
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading config from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config directory for tagwatch.
/// Uses $XDG_CONFIG_HOME/tagwatch if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/tagwatch,
/// or ./tagwatch if neither is available.
pub fn config_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the data directory for tagwatch.
/// Uses $XDG_DATA_HOME/tagwatch if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/tagwatch,
/// or ./tagwatch if neither is available.
pub fn data_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the tag cache database.
pub fn db_path() -> PathBuf {
    data_dir().join("tags.db")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("tagwatch.log")
}

fn app_dir_with_env(xdg_home: Option<String>, home_dir: Option<PathBuf>, fallback: &str) -> PathBuf {
    let base = xdg_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
