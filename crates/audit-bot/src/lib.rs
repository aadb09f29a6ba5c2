//! # audit-bot
//!
//! Connects to the chat platform gateway and feeds ban, unban, and
//! voice-state events into the audit pipeline.

pub mod commands;
pub mod handler;
pub mod platform;

use std::sync::Arc;

use audit_common::{AppConfig, AppError};
use audit_service::ServiceContextBuilder;
use serenity::all::{Client, Http};

use crate::handler::AuditHandler;
use crate::platform::SerenityPlatform;

/// Build the services and run the gateway client until it stops
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let token = config.discord.token.clone();

    // Platform ports share one HTTP client
    let http = Arc::new(Http::new(&token));
    let platform = Arc::new(SerenityPlatform::new(http));

    let services = ServiceContextBuilder::new()
        .audit_log(platform.clone())
        .bans(platform.clone())
        .sender(platform)
        .config(config.audit.clone())
        .build()?;

    let handler = AuditHandler::new(Arc::new(services), config.discord.command_prefix.clone());

    tracing::info!(
        app = %config.app.name,
        env = ?config.app.env,
        audit_channel = %config.audit.channel_name,
        "Connecting to gateway..."
    );

    let mut client = Client::builder(&token, AuditHandler::intents())
        .event_handler(handler)
        .await
        .map_err(AppError::client)?;

    client.start().await.map_err(AppError::client)
}
