//! Typed values shared by the webhook records.

pub mod status;

pub use status::{CanonicalStatus, InvalidStatus, SmsStatus, VoiceStatus};
