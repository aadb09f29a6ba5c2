//! Record formatter - turns an event description into an `AuditRecord`
//!
//! Pure functions: the same inputs always produce the same record.

use audit_core::{AuditRecord, Member, RecordField, Snowflake, User};
use chrono::{DateTime, Utc};

use super::attribution::Attribution;

/// Accent color of moderation records (ban, unban)
pub const MODERATION_COLOR: u32 = 0xff6b6b;
/// Accent color of voice activity records
pub const VOICE_COLOR: u32 = 0x00ff00;

// Field labels
pub const MODERATOR_LABEL: &str = "👮 Moderator";
pub const TARGET_LABEL: &str = "🎯 Target";
pub const REASON_LABEL: &str = "📝 Reason";
pub const USER_LABEL: &str = "👤 User";
pub const CHANNEL_LABEL: &str = "📺 Channel";
pub const ACTION_LABEL: &str = "📝 Action";

/// Who performed a moderation action, as shown on the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationActor {
    User(User),
    /// The actor is not known; the note explains why
    Unknown(String),
}

impl ModerationActor {
    fn render(&self) -> String {
        match self {
            Self::User(user) => user.mention_with_id(),
            Self::Unknown(note) => note.clone(),
        }
    }
}

/// What happened to the member in a voice record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceVerb {
    Joined,
    MovedTo,
    Left,
    RemovedFrom,
    /// Second half of a channel-to-channel move
    Entered,
}

impl VoiceVerb {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Joined => "joined the voice channel",
            Self::MovedTo => "was moved to the voice channel",
            Self::Left => "left the voice channel",
            Self::RemovedFrom => "was removed from the voice channel",
            Self::Entered => "entered the voice channel",
        }
    }
}

/// Record formatter
pub struct RecordFormatter;

impl RecordFormatter {
    /// Build a moderation record (ban, unban)
    ///
    /// `extra_fields` are appended in order; fields with an empty value are skipped.
    pub fn format_moderation_record(
        guild_id: Snowflake,
        action: &str,
        actor: &ModerationActor,
        target: &User,
        reason: Option<&str>,
        extra_fields: &[RecordField],
        at: DateTime<Utc>,
    ) -> AuditRecord {
        let mut record = AuditRecord::new(format!("🔍 Audit Log - {action}"), MODERATION_COLOR)
            .field(RecordField::inline(MODERATOR_LABEL, actor.render()))
            .field(RecordField::inline(TARGET_LABEL, target.mention_with_id()));

        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            record.push_field(RecordField::block(REASON_LABEL, reason));
        }

        for field in extra_fields.iter().filter(|f| f.has_value()) {
            record.push_field(field.clone());
        }

        record
            .footer(format!("Server ID: {guild_id}"))
            .timestamp(at)
    }

    /// Build a voice activity record
    pub fn format_voice_record(
        member: &Member,
        verb: VoiceVerb,
        channel_name: &str,
        attribution: &Attribution,
        at: DateTime<Utc>,
    ) -> AuditRecord {
        let user = &member.user;
        let description = format!(
            "👉🎶 @{} <{}> {} 💬 • {}",
            member.display_name(),
            user.name,
            verb.as_str(),
            channel_name
        );

        let mut record = AuditRecord::new("🔍 Audit Log - Voice Activity", VOICE_COLOR)
            .description(description)
            .field(RecordField::inline(USER_LABEL, user.mention_with_id()))
            .field(RecordField::inline(CHANNEL_LABEL, channel_name));

        match attribution {
            Attribution::Actor {
                is_system: true, ..
            } => {
                record.push_field(RecordField::inline(MODERATOR_LABEL, "System/Moderator"));
                record.push_field(RecordField::inline(ACTION_LABEL, "Moved by a moderator"));
            }
            Attribution::Actor { user: actor, .. } => {
                record.push_field(RecordField::inline(MODERATOR_LABEL, actor.mention_with_id()));
                record.push_field(RecordField::inline(
                    ACTION_LABEL,
                    format!("Moved by {}", actor.name),
                ));
            }
            Attribution::Unknown => {
                record.push_field(RecordField::inline(ACTION_LABEL, "Self-initiated"));
            }
        }

        record
            .footer(format!(
                "User ID: {} • {}",
                user.id,
                at.format("%d/%m/%Y at %H:%M")
            ))
            .timestamp(at)
    }
}
