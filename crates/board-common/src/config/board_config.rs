//! Board configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file).

use serde::Deserialize;
use std::env;

use crate::telemetry::TracingConfig;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    pub app: AppSettings,
    pub store: StoreConfig,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
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

/// How `mark_as_read` maintains the unread counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnreadCountPolicy {
    /// Decrement only when an unread notification actually became read
    #[default]
    Corrected,
    /// Decrement on every call, even for unknown or already-read ids.
    /// The counter can drift from the collection and go negative.
    Legacy,
}

impl std::str::FromStr for UnreadCountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "corrected" => Ok(Self::Corrected),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("Invalid unread count policy: {s}")),
        }
    }
}

/// Collaboration store settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub unread_policy: UnreadCountPolicy,
    /// Turn lookup misses into `NotFound` errors at the context boundary
    #[serde(default)]
    pub strict_lookups: bool,
    /// Capacity of each store's event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            unread_policy: UnreadCountPolicy::default(),
            strict_lookups: false,
            event_buffer: default_event_buffer(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "ideation-board".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_event_buffer() -> usize {
    256
}

impl BoardConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
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

        let unread_policy = match lookup("BOARD_UNREAD_POLICY") {
            Some(s) => s
                .parse::<UnreadCountPolicy>()
                .map_err(|_| ConfigError::InvalidValue("BOARD_UNREAD_POLICY", s))?,
            None => UnreadCountPolicy::default(),
        };

        let strict_lookups = match lookup("BOARD_STRICT_LOOKUPS") {
            Some(s) => parse_bool(&s).ok_or(ConfigError::InvalidValue("BOARD_STRICT_LOOKUPS", s))?,
            None => false,
        };

        let event_buffer = match lookup("BOARD_EVENT_BUFFER") {
            Some(s) => match s.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidValue("BOARD_EVENT_BUFFER", s)),
            },
            None => default_event_buffer(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            store: StoreConfig {
                unread_policy,
                strict_lookups,
                event_buffer,
            },
        })
    }

    /// Pick a tracing setup matching the environment
    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        if self.app.env.is_production() {
            TracingConfig::production()
        } else if self.app.env.is_development() {
            TracingConfig::development()
        } else {
            TracingConfig::default()
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
