//! # Twilio Webhook
//!
//! Decodes the callbacks Twilio posts for Proxy sessions and inbound SMS into
//! typed records, and parses the SMS and call status strings they carry.
//!
//! Verifying webhook signatures is left to the HTTP layer receiving the request.

pub mod config;
pub mod consts;
pub mod errors;
pub mod logger;
pub mod models;
pub mod webhook;

pub use errors::DecodeError;
pub use models::{CanonicalStatus, InvalidStatus, SmsStatus, VoiceStatus};
