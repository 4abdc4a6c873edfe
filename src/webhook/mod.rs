//! Twilio webhook payloads and the decoder mapping them onto typed records.
//!
//! ## Modules
//!
//! - [`decoder`] - Maps form values, form bodies or JSON bodies onto a record
//! - [`fields`] - Serde helpers for text and timestamp fields
//! - [`proxy`] - Twilio Proxy callback records and the embedded interaction data
//! - [`sms`] - Inbound SMS webhook record and its media attachments

pub mod decoder;
pub mod fields;
pub mod proxy;
pub mod sms;

pub use decoder::{WebhookDecoder, decode_form, decode_json, decode_values};
pub use proxy::{
    InteractionData, ProxyCallbackWebhook, ProxyInterceptCallbackWebhook,
    ProxyOutOfSessionCallbackWebhook,
};
pub use sms::{Media, MediaItem, SmsWebhook};
