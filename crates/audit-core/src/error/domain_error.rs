//! Domain errors - the per-event failure taxonomy
//!
//! None of these are fatal: every variant is caught at the boundary of the
//! event handler that produced it and converted into a logged outcome.

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No channel in the guild carries the configured audit channel name
    #[error("Audit channel not found: {0}")]
    ChannelNotFound(String),

    /// The bot cannot post in a channel
    #[error("Missing send permission in channel {name} ({id})")]
    PermissionDenied { id: Snowflake, name: String },

    /// The administrative action log could not identify an actor
    #[error("Attribution unavailable: {0}")]
    AttributionUnavailable(String),

    /// The platform rejected or failed a send
    #[error("Delivery failed: {0}")]
    DeliveryFailure(String),

    /// Any other error surfaced by a platform port
    #[error("Platform error: {0}")]
    Platform(String),
}

impl DomainError {
    /// Get a stable error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChannelNotFound(_) => "CHANNEL_NOT_FOUND",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::AttributionUnavailable(_) => "ATTRIBUTION_UNAVAILABLE",
            Self::DeliveryFailure(_) => "DELIVERY_FAILURE",
            Self::Platform(_) => "PLATFORM_ERROR",
        }
    }

    /// Errors that make the delivery router try another channel
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, Self::ChannelNotFound(_) | Self::PermissionDenied { .. })
    }

    /// Create a platform error from anything displayable
    pub fn platform(err: impl std::fmt::Display) -> Self {
        Self::Platform(err.to_string())
    }
}
