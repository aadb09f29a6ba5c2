//! Ban detail - the platform's record of a guild ban

use crate::entities::User;

/// Ban record as returned by the platform's ban lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanDetail {
    pub user: User,
    pub reason: Option<String>,
}

impl BanDetail {
    /// The recorded reason, ignoring blank strings
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}
