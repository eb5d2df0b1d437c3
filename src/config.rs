use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::reserves::DEFAULT_LIMIT;

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "RESERVES_API_BASE_URL";
/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "RESERVES_CONFIG";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Reserves API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server root; the GraphQL endpoint is `{base_url}/graphql`.
    pub base_url: String,
    /// Request timeout in seconds. Unset leaves the transport default.
    pub timeout_secs: Option<u64>,
    /// Page size used when the store loads the catalog.
    pub page_size: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Override the default log directory.
    pub log_dir: Option<PathBuf>,
    /// Write JSON logs to a daily rolling file.
    pub file: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: None,
            page_size: DEFAULT_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
            file: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/lancer-reserves/config.toml`
    /// (or `$RESERVES_CONFIG`), then apply environment overrides.
    /// Falls back to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);

        Self::load_from(&config_path).with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Load from an explicit path without environment overrides.
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Apply overrides looked up through `lookup` (normally `std::env::var`).
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base_url;
        }
        self
    }

    /// Resolved log directory (override or XDG default).
    pub fn log_dir(&self) -> PathBuf {
        self.logging.log_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("lancer-reserves").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("lancer-reserves").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
