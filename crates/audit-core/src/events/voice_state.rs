//! Voice-state transition - one member's voice channel change
//!
//! Exists only for the duration of handling one gateway event.

use chrono::{DateTime, Utc};

use crate::entities::Member;
use crate::value_objects::Snowflake;

/// The voice channel on one side of a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelRef {
    pub id: Snowflake,
    pub name: String,
}

impl VoiceChannelRef {
    pub fn new(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Classification of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind<'a> {
    /// Same channel on both sides (mute, deafen, stream toggles, ...)
    Unchanged,
    /// No channel before, a channel after
    Joined(&'a VoiceChannelRef),
    /// A channel before, none after
    Left(&'a VoiceChannelRef),
    /// Two different channels
    Moved {
        from: &'a VoiceChannelRef,
        to: &'a VoiceChannelRef,
    },
}

/// A member's voice channel membership before and after a gateway event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceStateTransition {
    pub member: Member,
    pub before: Option<VoiceChannelRef>,
    pub after: Option<VoiceChannelRef>,
    pub observed_at: DateTime<Utc>,
}

impl VoiceStateTransition {
    pub fn new(
        member: Member,
        before: Option<VoiceChannelRef>,
        after: Option<VoiceChannelRef>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member,
            before,
            after,
            observed_at,
        }
    }

    /// Classify the transition; channels compare by ID
    pub fn kind(&self) -> TransitionKind<'_> {
        match (&self.before, &self.after) {
            (None, None) => TransitionKind::Unchanged,
            (Some(before), Some(after)) if before.id == after.id => TransitionKind::Unchanged,
            (None, Some(after)) => TransitionKind::Joined(after),
            (Some(before), None) => TransitionKind::Left(before),
            (Some(from), Some(to)) => TransitionKind::Moved { from, to },
        }
    }

    /// Whether the member's channel actually changed
    pub fn is_change(&self) -> bool {
        !matches!(self.kind(), TransitionKind::Unchanged)
    }
}
