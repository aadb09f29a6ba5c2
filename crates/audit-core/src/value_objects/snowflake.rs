//! Snowflake ID - the platform's 64-bit identifier
//!
//! The top 42 bits hold milliseconds since the platform epoch, which is how
//! the age of an action-log entry is known without a separate timestamp.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform Snowflake ID
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Platform epoch: 2015-01-01 00:00:00 UTC, in Unix milliseconds
    pub const EPOCH: u64 = 1_420_070_400_000;

    const TIMESTAMP_SHIFT: u32 = 22;

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Unix milliseconds at which the ID was minted
    #[inline]
    pub fn timestamp(&self) -> u64 {
        (self.0 >> Self::TIMESTAMP_SHIFT) + Self::EPOCH
    }

    /// Smallest ID minted at `at`; instants before the epoch clamp to zero
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        let millis = u64::try_from(at.timestamp_millis()).unwrap_or(0);
        Self(millis.saturating_sub(Self::EPOCH) << Self::TIMESTAMP_SHIFT)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        i64::try_from(self.timestamp())
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// `<@id>`
    pub fn user_mention(&self) -> String {
        format!("<@{}>", self.0)
    }

    /// `<#id>`
    pub fn channel_mention(&self) -> String {
        format!("<#{}>", self.0)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}
