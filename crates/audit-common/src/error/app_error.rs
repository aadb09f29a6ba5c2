//! Application error types
//!
//! Startup and process-level failures. Per-event failures stay inside the
//! event handlers as `DomainError` outcomes and never reach this type.

use audit_core::DomainError;
use std::fmt;

use crate::config::ConfigError;
use crate::telemetry::TracingError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Logging setup
    #[error(transparent)]
    Tracing(#[from] TracingError),

    // Platform client errors (login, gateway session)
    #[error("Client error: {0}")]
    Client(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Get a stable error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(ConfigError::MissingVar(_)) => "STARTUP_CONFIG_MISSING",
            Self::Config(ConfigError::InvalidValue(..)) => "CONFIG_INVALID",
            Self::Tracing(_) => "TRACING_ERROR",
            Self::Client(_) => "CLIENT_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this error happened before the platform connection was attempted
    #[must_use]
    pub fn is_startup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Tracing(_))
    }

    /// Create a client error from anything displayable
    #[must_use]
    pub fn client(err: impl fmt::Display) -> Self {
        Self::Client(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
