//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// App id placeholder shipped in sample `.env` files
const APP_ID_PLACEHOLDER: &str = "your-app-id-here";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
    pub identity: IdentityConfig,
    pub images: ImagesConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
    /// Emit JSON logs
    #[serde(default)]
    pub log_json: bool,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// How a reaction toggle decides between create and delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStrategy {
    /// Scan the last-seen snapshot, then create with a fresh id or delete
    #[default]
    Snapshot,
    /// Same decision, but created records use an id derived from
    /// `(user, emoji, image)` so duplicate creates collapse in the store
    Deterministic,
}

/// Synchronized store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// App id of the live store; `None` selects the inert store
    pub app_id: Option<String>,
    #[serde(default)]
    pub toggle_strategy: ToggleStrategy,
}

impl StoreConfig {
    /// Whether a live store is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.app_id.is_some()
    }
}

/// Local identity persistence
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_path")]
    pub path: PathBuf,
}

/// Image provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    pub access_key: Option<String>,
    #[serde(default = "default_images_api_url")]
    pub api_url: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

// Default value functions
fn default_app_name() -> String {
    "photo-reactions".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_identity_path() -> PathBuf {
    PathBuf::from(".photo-reactions/identity.json")
}

fn default_images_api_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_per_page() -> u32 {
    20
}

/// Treat blank values and the sample placeholder as "not set"
fn normalize_app_id(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != APP_ID_PLACEHOLDER)
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue(name, raw.to_string())),
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(s) => match s.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", s)),
            },
            None => default_env(),
        };

        let toggle_strategy = match lookup("SYNC_TOGGLE_STRATEGY") {
            Some(s) => match s.to_lowercase().as_str() {
                "snapshot" => ToggleStrategy::Snapshot,
                "deterministic" => ToggleStrategy::Deterministic,
                _ => return Err(ConfigError::InvalidValue("SYNC_TOGGLE_STRATEGY", s)),
            },
            None => ToggleStrategy::default(),
        };

        let per_page = match lookup("IMAGES_PER_PAGE") {
            Some(s) => match s.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("IMAGES_PER_PAGE", s)),
            },
            None => default_per_page(),
        };

        let log_json = match lookup("LOG_JSON") {
            Some(s) => parse_bool("LOG_JSON", &s)?,
            None => env.is_production(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_json,
            },
            store: StoreConfig {
                app_id: normalize_app_id(lookup("SYNC_APP_ID")),
                toggle_strategy,
            },
            identity: IdentityConfig {
                path: lookup("IDENTITY_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(default_identity_path),
            },
            images: ImagesConfig {
                access_key: non_blank(lookup("UNSPLASH_ACCESS_KEY")),
                api_url: lookup("UNSPLASH_API_URL").unwrap_or_else(default_images_api_url),
                per_page,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
