//! Gateway events - the inbound event kinds and the voice-state transition value

mod event_types;
mod voice_state;

pub use event_types::GatewayEventType;
pub use voice_state::{TransitionKind, VoiceChannelRef, VoiceStateTransition};
