//! # Webhook Field Mapper
//!
//! Maps flat wire payloads onto the typed webhook records. The external field
//! names live on the records themselves (`#[serde(rename = "...")]`), so the
//! decoder only has to feed it the key/value pairs:
//!
//! - [`WebhookDecoder::decode_values`] for already parsed form values
//! - [`WebhookDecoder::decode_form`] for a raw `application/x-www-form-urlencoded` body
//! - [`WebhookDecoder::decode_json`] for a JSON body
//!
//! Keys are matched exactly and case-sensitively. Keys a record does not declare
//! are ignored, declared keys that are missing keep their default value and a
//! repeated key keeps its last value. Decoding either returns a complete record or
//! an error, never a partially filled one.

use crate::{
    config::{self, DecoderConfig},
    errors::DecodeError,
};
use log::debug;
use serde::de::{DeserializeOwned, value::MapDeserializer};
use std::{any::type_name, collections::BTreeMap, sync::LazyLock};
use url::form_urlencoded;

/// Decoder shared by the free functions of this module, built once from [`config::DECODER_CONFIG`].
pub static DEFAULT_DECODER: LazyLock<WebhookDecoder> =
    LazyLock::new(|| WebhookDecoder::new(config::DECODER_CONFIG.clone()));

#[derive(Debug, Clone, Default)]
pub struct WebhookDecoder {
    config: DecoderConfig,
}

impl WebhookDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Populates `T` from already decoded form values.
    pub fn decode_values<T, I, K, V>(&self, values: I) -> Result<T, DecodeError>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let fields: BTreeMap<String, String> = values
            .into_iter()
            .map(|(key, value)| (key.as_ref().to_string(), value.as_ref().to_string()))
            .collect();

        debug!(
            "decoding {} from {} form values",
            type_name::<T>(),
            fields.len()
        );
        map_fields(&fields)
    }

    /// Populates `T` from a raw url-encoded form body.
    pub fn decode_form<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError> {
        self.check_body(body)?;
        debug!(
            "decoding {} from {} bytes form body",
            type_name::<T>(),
            body.len()
        );

        let fields: BTreeMap<String, String> = form_urlencoded::parse(body).into_owned().collect();
        map_fields(&fields)
    }

    /// Populates `T` from a JSON body.
    pub fn decode_json<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, DecodeError> {
        self.check_body(body)?;
        debug!(
            "decoding {} from {} bytes json body",
            type_name::<T>(),
            body.len()
        );

        serde_json::from_slice(body).map_err(|err| DecodeError::MalformedJson(err.to_string()))
    }

    fn check_body(&self, body: &[u8]) -> Result<(), DecodeError> {
        if body.len() > self.config.max_body_bytes {
            return Err(DecodeError::PayloadTooLarge {
                size: body.len(),
                limit: self.config.max_body_bytes,
            });
        }

        if self.config.log_payloads {
            debug!("webhook payload: {}", String::from_utf8_lossy(body));
        }
        Ok(())
    }
}

fn map_fields<T: DeserializeOwned>(fields: &BTreeMap<String, String>) -> Result<T, DecodeError> {
    let deserializer = MapDeserializer::<_, serde::de::value::Error>::new(
        fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str())),
    );

    T::deserialize(deserializer).map_err(|err| DecodeError::MalformedForm(err.to_string()))
}

/// Decodes form values with the [`DEFAULT_DECODER`].
pub fn decode_values<T, I, K, V>(values: I) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    DEFAULT_DECODER.decode_values(values)
}

/// Decodes a url-encoded body with the [`DEFAULT_DECODER`].
pub fn decode_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    DEFAULT_DECODER.decode_form(body)
}

/// Decodes a JSON body with the [`DEFAULT_DECODER`].
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    DEFAULT_DECODER.decode_json(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::{ProxyCallbackWebhook, ProxyOutOfSessionCallbackWebhook, SmsWebhook};
    use std::collections::HashMap;

    #[test]
    fn test_decode_values_from_hashmap() {
        let values = HashMap::from([("SmsSid", "SM123")]);
        let hook: ProxyOutOfSessionCallbackWebhook = decode_values(values).unwrap();
        assert_eq!(hook.sms_sid, "SM123");
        assert_eq!(hook.body, "");
    }

    #[test]
    fn test_decode_form_percent_decoding() {
        let hook: ProxyOutOfSessionCallbackWebhook =
            decode_form(b"Body=hello+there%21&From=%2B15551230000").unwrap();
        assert_eq!(hook.body, "hello there!");
        assert_eq!(hook.from, "+15551230000");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let hook: ProxyOutOfSessionCallbackWebhook =
            decode_form(b"Digits=1&Digits=2&Digits=3").unwrap();
        assert_eq!(hook.digits, "3");
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let hook: ProxyOutOfSessionCallbackWebhook =
            decode_values([("smssid", "SM1"), ("SMSSID", "SM2"), ("body", "hi")]).unwrap();
        assert_eq!(hook.sms_sid, "");
        assert_eq!(hook.body, "");
    }

    #[test]
    fn test_empty_body_yields_defaults() {
        let hook: ProxyCallbackWebhook = decode_form(b"").unwrap();
        assert_eq!(hook, ProxyCallbackWebhook::default());
    }

    #[test]
    fn test_bad_timestamp_fails_whole_decode() {
        let err = decode_form::<ProxyCallbackWebhook>(
            b"interactionSid=KI1&interactionDateCreated=not-a-date",
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::MalformedForm(msg) if msg.contains("not-a-date")));
    }

    #[test]
    fn test_body_limit() {
        let decoder = WebhookDecoder::new(DecoderConfig {
            max_body_bytes: 8,
            log_payloads: true,
        });
        let err = decoder
            .decode_form::<ProxyCallbackWebhook>(b"interactionSid=KI123")
            .unwrap_err();
        assert_eq!(err, DecodeError::PayloadTooLarge { size: 20, limit: 8 });

        let err = decoder
            .decode_json::<SmsWebhook>(br#"{"Body":"a long body"}"#)
            .unwrap_err();
        assert!(matches!(err, DecodeError::PayloadTooLarge { limit: 8, .. }));

        assert!(decoder.decode_form::<ProxyCallbackWebhook>(b"ttl=1").is_ok());
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_json::<SmsWebhook>(b"Body=hi").unwrap_err();
        assert!(matches!(err, DecodeError::MalformedJson(_)));

        let err = decode_json::<SmsWebhook>(br#"{"Body": 5}"#).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedJson(_)));
    }

    #[test]
    fn test_concurrent_decodes_share_the_default_decoder() {
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|n| {
                    scope.spawn(move || {
                        let sid = format!("CA{n}");
                        decode_values::<ProxyOutOfSessionCallbackWebhook, _, _, _>([(
                            "CallSid",
                            sid.as_str(),
                        )])
                        .map(|hook| hook.call_sid)
                    })
                })
                .collect();

            for (n, handle) in handles.into_iter().enumerate() {
                assert_eq!(handle.join().unwrap(), Ok(format!("CA{n}")));
            }
        });
    }

    #[test]
    fn test_default_decoder_uses_default_limit() {
        assert!(DEFAULT_DECODER.config().max_body_bytes > 0);
    }
}
