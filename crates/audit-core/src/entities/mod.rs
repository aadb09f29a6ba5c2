//! Domain entities - the read-only platform objects the bot reasons about

mod audit_entry;
mod ban;
mod channel;
mod guild;
mod member;
mod user;

pub use audit_entry::{AdministrativeActionEntry, AuditAction};
pub use ban::BanDetail;
pub use channel::{Channel, ChannelKind};
pub use guild::Guild;
pub use member::Member;
pub use user::User;
