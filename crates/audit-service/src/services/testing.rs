//! In-memory ports for service unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use audit_common::AuditConfig;
use audit_core::traits::{ActionQuery, AuditLogSource, BanLookup, PlatformResult, RecordSender};
use audit_core::{
    AdministrativeActionEntry, AuditAction, AuditRecord, BanDetail, Channel, DomainError, Guild,
    Member, Permissions, Snowflake, User,
};
use parking_lot::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use super::context::{ServiceContext, ServiceContextBuilder};

pub const GUILD_ID: Snowflake = Snowflake::new(1);
pub const BOT_ID: Snowflake = Snowflake::new(99);
pub const AUDIT_NAME: &str = "audit-log";

/// Scripted platform: action log and ban responses in, sent records out
#[derive(Default)]
pub struct FakePorts {
    pub actions: Mutex<HashMap<AuditAction, Vec<AdministrativeActionEntry>>>,
    pub log_error: Mutex<Option<DomainError>>,
    pub queries: Mutex<Vec<ActionQuery>>,
    pub ban: Mutex<Option<PlatformResult<Option<BanDetail>>>>,
    pub send_error: Mutex<Option<DomainError>>,
    pub sent: Mutex<Vec<(Snowflake, AuditRecord)>>,
}

impl FakePorts {
    /// Add an entry; later pushes are newer
    pub fn push_action(&self, entry: AdministrativeActionEntry) {
        self.actions
            .lock()
            .entry(entry.action)
            .or_default()
            .insert(0, entry);
    }

    pub fn fail_log(&self, err: DomainError) {
        *self.log_error.lock() = Some(err);
    }

    pub fn fail_sends(&self, err: DomainError) {
        *self.send_error.lock() = Some(err);
    }

    pub fn set_ban(&self, result: PlatformResult<Option<BanDetail>>) {
        *self.ban.lock() = Some(result);
    }

    pub fn sent(&self) -> Vec<(Snowflake, AuditRecord)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl AuditLogSource for FakePorts {
    async fn recent_actions(
        &self,
        _guild_id: Snowflake,
        query: ActionQuery,
    ) -> PlatformResult<Vec<AdministrativeActionEntry>> {
        self.queries.lock().push(query);
        if let Some(err) = self.log_error.lock().clone() {
            return Err(err);
        }
        Ok(self
            .actions
            .lock()
            .get(&query.action)
            .map(|entries| entries.iter().take(query.limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl BanLookup for FakePorts {
    async fn fetch_ban(
        &self,
        _guild_id: Snowflake,
        _user_id: Snowflake,
    ) -> PlatformResult<Option<BanDetail>> {
        self.ban.lock().clone().unwrap_or(Ok(None))
    }
}

#[async_trait]
impl RecordSender for FakePorts {
    async fn send_record(&self, channel_id: Snowflake, record: &AuditRecord) -> PlatformResult<()> {
        if let Some(err) = self.send_error.lock().clone() {
            return Err(err);
        }
        self.sent.lock().push((channel_id, record.clone()));
        Ok(())
    }
}

/// Counts ERROR events emitted on the current thread while installed
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl ErrorCounter {
    pub fn install(&self) -> DefaultGuard {
        tracing_subscriber::registry().with(self.clone()).set_default()
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub fn context(ports: &Arc<FakePorts>) -> ServiceContext {
    ServiceContextBuilder::new()
        .audit_log(ports.clone())
        .bans(ports.clone())
        .sender(ports.clone())
        .config(AuditConfig {
            channel_name: AUDIT_NAME.to_string(),
            attribution_window_secs: 15,
        })
        .build()
        .unwrap()
}

pub fn bot() -> User {
    User::new_bot(BOT_ID, "auditor")
}

pub fn member(id: u64, name: &str) -> Member {
    Member::new(GUILD_ID, User::new(Snowflake::new(id), name))
}

/// A guild with a voice channel, a read-only text channel, and a writable `general`
pub fn guild_without_audit() -> Guild {
    Guild::new(GUILD_ID, "Test Guild", bot())
        .with_bot_permissions(Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES)
        .with_channel(Channel::new_voice(Snowflake::new(10), "Lobby", Permissions::CONNECT))
        .with_channel(Channel::new_voice(Snowflake::new(11), "Music", Permissions::CONNECT))
        .with_channel(Channel::new_text(Snowflake::new(20), "rules", Permissions::VIEW_CHANNEL))
        .with_channel(Channel::new_text(
            Snowflake::new(21),
            "general",
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        ))
}

pub fn audit_channel(permissions: Permissions) -> Channel {
    Channel::new_text(Snowflake::new(30), AUDIT_NAME, permissions)
}

pub fn guild_with_audit() -> Guild {
    guild_without_audit().with_channel(audit_channel(Permissions::AUDIT_CHANNEL))
}
