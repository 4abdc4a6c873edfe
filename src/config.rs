//! Decoder configuration.
//!
//! The field-name mapping tables are compile-time data on the record types; what
//! is configurable here only concerns how raw bodies are accepted and logged.
//! The configuration is read once and never mutated afterwards.

use crate::consts;
use envconfig::Envconfig;
use std::sync::LazyLock;

#[derive(Envconfig, Debug, Clone, PartialEq)]
pub struct DecoderConfig {
    /// Largest raw body, in bytes, the decoder accepts
    #[envconfig(from = "WEBHOOK_MAX_BODY_BYTES", default = "65536")]
    pub max_body_bytes: usize,

    /// Log raw payloads at debug level (SENSITIVE)
    /// Payloads carry phone numbers and message bodies, keep disabled in production
    #[envconfig(from = "WEBHOOK_LOG_PAYLOADS", default = "false")]
    pub log_payloads: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: consts::DEFAULT_MAX_BODY_BYTES,
            log_payloads: false,
        }
    }
}

impl DecoderConfig {
    /// Loads the configuration from the environment, using defaults for unset variables.
    pub fn from_env() -> Result<Self, envconfig::Error> {
        Self::init_from_env()
    }
}

/// Process-wide decoder configuration.
///
/// Falls back to [`DecoderConfig::default`] when the environment holds invalid values.
pub static DECODER_CONFIG: LazyLock<DecoderConfig> = LazyLock::new(|| {
    DecoderConfig::from_env().unwrap_or_else(|err| {
        log::warn!("invalid webhook decoder configuration, using defaults: {err}");
        DecoderConfig::default()
    })
});
