//! Service context - dependency container for services
//!
//! Holds the platform ports and the audit settings needed by services.

use std::sync::Arc;

use audit_common::AuditConfig;
use audit_core::traits::{AuditLogSource, BanLookup, RecordSender};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the dependency container that gets passed to all services.
/// It provides access to:
/// - The administrative action log
/// - Ban lookups
/// - The outbound record sender
/// - Audit settings (channel name, attribution window)
///
/// Everything inside is read-only after startup, so the context is shared
/// across event tasks behind an `Arc` without locking.
#[derive(Clone)]
pub struct ServiceContext {
    // Ports
    audit_log: Arc<dyn AuditLogSource>,
    bans: Arc<dyn BanLookup>,
    sender: Arc<dyn RecordSender>,

    // Settings
    config: AuditConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        audit_log: Arc<dyn AuditLogSource>,
        bans: Arc<dyn BanLookup>,
        sender: Arc<dyn RecordSender>,
        config: AuditConfig,
    ) -> Self {
        Self {
            audit_log,
            bans,
            sender,
            config,
        }
    }

    // === Ports ===

    /// Get the administrative action log
    pub fn audit_log(&self) -> &dyn AuditLogSource {
        self.audit_log.as_ref()
    }

    /// Get the ban lookup
    pub fn bans(&self) -> &dyn BanLookup {
        self.bans.as_ref()
    }

    /// Get the record sender
    pub fn sender(&self) -> &dyn RecordSender {
        self.sender.as_ref()
    }

    // === Settings ===

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Name of the audit channel to look for in each guild
    pub fn audit_channel_name(&self) -> &str {
        &self.config.channel_name
    }

    /// Maximum age of an action log entry used to attribute a join or leave
    pub fn attribution_window(&self) -> chrono::Duration {
        i64::try_from(self.config.attribution_window_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ports", &"...")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    audit_log: Option<Arc<dyn AuditLogSource>>,
    bans: Option<Arc<dyn BanLookup>>,
    sender: Option<Arc<dyn RecordSender>>,
    config: AuditConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            audit_log: None,
            bans: None,
            sender: None,
            config: AuditConfig::default(),
        }
    }

    pub fn audit_log(mut self, source: Arc<dyn AuditLogSource>) -> Self {
        self.audit_log = Some(source);
        self
    }

    pub fn bans(mut self, lookup: Arc<dyn BanLookup>) -> Self {
        self.bans = Some(lookup);
        self
    }

    pub fn sender(mut self, sender: Arc<dyn RecordSender>) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` if any port is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.audit_log
                .ok_or(ServiceError::MissingDependency("audit_log"))?,
            self.bans.ok_or(ServiceError::MissingDependency("bans"))?,
            self.sender.ok_or(ServiceError::MissingDependency("sender"))?,
            self.config,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
