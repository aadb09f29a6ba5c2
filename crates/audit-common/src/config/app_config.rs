//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub discord: DiscordConfig,
    pub audit: AuditConfig,
    pub log: LogConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Platform connection settings
#[derive(Clone)]
pub struct DiscordConfig {
    pub token: String,
    pub command_prefix: String,
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"<redacted>")
            .field("command_prefix", &self.command_prefix)
            .finish()
    }
}

/// Audit pipeline settings
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Exact, case-sensitive name of the audit channel
    pub channel_name: String,
    /// Maximum age of an action log entry used to attribute a join or leave
    pub attribution_window_secs: u64,
}

impl AuditConfig {
    #[must_use]
    pub fn attribution_window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.attribution_window_secs)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            channel_name: default_audit_channel_name(),
            attribution_window_secs: default_attribution_window_secs(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

// Default value functions
fn default_app_name() -> String {
    "voice-audit".to_string()
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_audit_channel_name() -> String {
    "🔐╺╸auditoria".to_string()
}

fn default_attribution_window_secs() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if `DISCORD_TOKEN` is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if `DISCORD_TOKEN` is missing or a value does not parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = match var("APP_ENV") {
            Some(raw) => Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
            None => Environment::default(),
        };

        let token = var("DISCORD_TOKEN").ok_or(ConfigError::MissingVar("DISCORD_TOKEN"))?;

        let attribution_window_secs = match var("ATTRIBUTION_WINDOW_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ATTRIBUTION_WINDOW_SECS", raw))?,
            None => default_attribution_window_secs(),
        };

        let json = match var("LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("LOG_JSON", raw))?,
            None => env.is_production(),
        };

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
            },
            discord: DiscordConfig {
                token: token.trim().to_string(),
                command_prefix: var("COMMAND_PREFIX").unwrap_or_else(default_command_prefix),
            },
            audit: AuditConfig {
                channel_name: var("AUDIT_CHANNEL_NAME").unwrap_or_else(default_audit_channel_name),
                attribution_window_secs,
            },
            log: LogConfig {
                level: var("LOG_LEVEL").unwrap_or_else(default_log_level),
                json,
            },
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
