//! Test helpers for integration tests
//!
//! Provides an in-memory platform that plays back scripted action-log and ban
//! responses and records every message the bot sends, plus a harness that
//! wires it into a `ServiceContext`.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use audit_common::AuditConfig;
use audit_core::traits::{ActionQuery, AuditLogSource, BanLookup, PlatformResult, RecordSender};
use audit_core::{
    AdministrativeActionEntry, AuditAction, AuditRecord, BanDetail, DomainError, Snowflake,
};
use audit_service::{EventRouter, ServiceContext, ServiceContextBuilder};
use parking_lot::Mutex;

use crate::fixtures::AUDIT_CHANNEL_NAME;

/// A message the bot sent
#[derive(Debug, Clone)]
pub struct SentRecord {
    pub channel_id: Snowflake,
    pub record: AuditRecord,
}

/// In-memory platform
#[derive(Default)]
pub struct FakePlatform {
    actions: Mutex<HashMap<AuditAction, Vec<AdministrativeActionEntry>>>,
    log_error: Mutex<Option<DomainError>>,
    log_queries: Mutex<usize>,
    ban: Mutex<Option<PlatformResult<Option<BanDetail>>>>,
    sent: Mutex<Vec<SentRecord>>,
}

impl FakePlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Record an administrative action; the latest call is the newest entry
    pub fn record_action(&self, entry: AdministrativeActionEntry) {
        self.actions
            .lock()
            .entry(entry.action)
            .or_default()
            .insert(0, entry);
    }

    /// Make every action-log query fail
    pub fn fail_action_log(&self, err: DomainError) {
        *self.log_error.lock() = Some(err);
    }

    pub fn set_ban(&self, ban: BanDetail) {
        *self.ban.lock() = Some(Ok(Some(ban)));
    }

    /// Make the ban lookup fail
    pub fn fail_ban_lookup(&self, err: DomainError) {
        *self.ban.lock() = Some(Err(err));
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().clone()
    }

    pub fn log_queries(&self) -> usize {
        *self.log_queries.lock()
    }
}

#[async_trait]
impl AuditLogSource for FakePlatform {
    async fn recent_actions(
        &self,
        _guild_id: Snowflake,
        query: ActionQuery,
    ) -> PlatformResult<Vec<AdministrativeActionEntry>> {
        *self.log_queries.lock() += 1;
        if let Some(err) = self.log_error.lock().clone() {
            return Err(err);
        }
        let actions = self.actions.lock();
        Ok(actions
            .get(&query.action)
            .map(|entries| entries.iter().take(usize::from(query.limit)).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl BanLookup for FakePlatform {
    async fn fetch_ban(
        &self,
        _guild_id: Snowflake,
        _user_id: Snowflake,
    ) -> PlatformResult<Option<BanDetail>> {
        self.ban.lock().clone().unwrap_or(Ok(None))
    }
}

#[async_trait]
impl RecordSender for FakePlatform {
    async fn send_record(&self, channel_id: Snowflake, record: &AuditRecord) -> PlatformResult<()> {
        self.sent.lock().push(SentRecord {
            channel_id,
            record: record.clone(),
        });
        Ok(())
    }
}

/// Services wired to a fake platform
pub struct TestBot {
    pub platform: Arc<FakePlatform>,
    pub context: ServiceContext,
}

impl TestBot {
    pub fn start() -> Result<Self> {
        Self::start_with_config(AuditConfig {
            channel_name: AUDIT_CHANNEL_NAME.to_string(),
            attribution_window_secs: 15,
        })
    }

    pub fn start_with_config(config: AuditConfig) -> Result<Self> {
        let platform = FakePlatform::new();
        let context = ServiceContextBuilder::new()
            .audit_log(platform.clone())
            .bans(platform.clone())
            .sender(platform.clone())
            .config(config)
            .build()?;
        Ok(Self { platform, context })
    }

    pub fn router(&self) -> EventRouter<'_> {
        EventRouter::new(&self.context)
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.platform.sent()
    }
}
