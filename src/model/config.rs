use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

const ENV_CONFIG_PATH: &str = "WASTE_SORTER_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_MODEL_SERVICE_URL: &str = "MODEL_SERVICE_URL";
const ENV_MODEL_SERVICE_TIMEOUT: &str = "MODEL_SERVICE_TIMEOUT_SECS";
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
const ENV_GEMINI_TIMEOUT: &str = "GEMINI_TIMEOUT_SECS";
const ENV_MAX_UPLOAD_BYTES: &str = "MAX_UPLOAD_BYTES";

const DEFAULT_MODEL_SERVICE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Models tried in order when the reasoning service reports quota exhaustion.
/// Earlier entries have the more generous quotas.
pub const DEFAULT_REASONING_MODELS: &[&str] = &[
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash",
];

/// Reasoning section of the YAML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReasoningFileConfig {
    /// Model priority list. Empty means "use the built-in list".
    #[serde(default)]
    pub models: Vec<String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub reasoning: ReasoningFileConfig,
}

/// Primary classifier connection settings
#[derive(Debug, Clone)]
pub struct PrimaryConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Reasoning service connection settings
#[derive(Debug, Clone)]
pub struct ReasoningConfig {
    /// `None` disables the reasoning service entirely
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub models: Vec<String>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub primary: PrimaryConfig,
    pub reasoning: ReasoningConfig,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary: PrimaryConfig {
                base_url: DEFAULT_MODEL_SERVICE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            reasoning: ReasoningConfig {
                api_key: None,
                base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                models: default_models(),
            },
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let api_key = std::env::var(ENV_GEMINI_API_KEY)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            primary: PrimaryConfig {
                base_url: std::env::var(ENV_MODEL_SERVICE_URL)
                    .unwrap_or_else(|_| DEFAULT_MODEL_SERVICE_URL.to_string()),
                timeout: timeout_from_env(ENV_MODEL_SERVICE_TIMEOUT),
            },
            reasoning: ReasoningConfig {
                api_key,
                base_url: std::env::var(ENV_GEMINI_BASE_URL)
                    .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout: timeout_from_env(ENV_GEMINI_TIMEOUT),
                models: resolve_models(file.reasoning),
            },
            max_upload_bytes: std::env::var(ENV_MAX_UPLOAD_BYTES)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_models() -> Vec<String> {
    DEFAULT_REASONING_MODELS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn resolve_models(file: ReasoningFileConfig) -> Vec<String> {
    let models: Vec<String> = file
        .models
        .into_iter()
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .collect();

    if models.is_empty() {
        default_models()
    } else {
        models
    }
}

fn timeout_from_env(var: &str) -> Duration {
    let secs = std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|s| *s > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}
