//! Audit bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p audit-bot
//! ```
//!
//! Configuration is loaded from environment variables (see `.env.example`).

use audit_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Default subscriber so the failure is still logged
            let _ = try_init_tracing();
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::from(&config.log)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(env = ?config.app.env, "Starting audit bot...");

    if let Err(e) = audit_bot::run(config).await {
        error!(code = e.error_code(), error = %e, "Audit bot stopped");
        std::process::exit(1);
    }
}
