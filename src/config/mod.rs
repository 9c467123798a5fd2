//! Configuration management.

mod file_config;

pub use file_config::{find_config_file, write_default_config, ConfigFileError, CONFIG_FILE_NAME};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{OrderBy, DEFAULT_LANG, DEFAULT_PAGES, DEFAULT_PAGE_SIZE};

/// Default base URL of the content API
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GUARDIAN_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint and credential settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Defaults applied to queries built by the CLI
    #[serde(default)]
    pub defaults: QueryDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key sent as `api-key` on every request
    #[serde(default = "default_api_key")]
    pub key: Option<String>,

    /// Base URL the endpoint paths are appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (`None` waits indefinitely)
    #[serde(default = "default_timeout")]
    pub timeout_secs: Option<u64>,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: default_api_key(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Option<u64> {
    Some(30)
}

/// Query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryDefaults {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub order_by: OrderBy,

    #[serde(default = "default_lang")]
    pub lang: String,

    /// Page bound for multi-page searches
    #[serde(default = "default_pages")]
    pub pages: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            order_by: OrderBy::default(),
            lang: default_lang(),
            pages: default_pages(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

fn default_pages() -> u32 {
    DEFAULT_PAGES
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` switches the subscriber to JSON lines
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Environment overrides: `GUARDIAN_<SECTION>__<FIELD>`, e.g.
/// `GUARDIAN_API__BASE_URL` or `GUARDIAN_DEFAULTS__PAGE_SIZE`.
fn environment() -> config::Environment {
    config::Environment::with_prefix("GUARDIAN")
        .prefix_separator("_")
        .separator("__")
}

fn build(path: Option<&Path>, env: config::Environment) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }
    let settings = builder.add_source(env).build()?;

    let mut loaded: Config = settings.try_deserialize()?;
    if loaded.api.key.is_none() {
        loaded.api.key = default_api_key();
    }
    Ok(loaded)
}

/// Load configuration from a file, then apply environment overrides.
///
/// The file must exist.
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    build(Some(path), environment())
}

/// Defaults plus environment overrides, for when there is no config file
pub fn get_config() -> Result<Config, config::ConfigError> {
    build(None, environment())
}
