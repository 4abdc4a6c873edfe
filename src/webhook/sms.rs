//! # Inbound SMS Webhook Schema
//!
//! Payload Twilio sends for an inbound SMS/MMS, see
//! <https://www.twilio.com/docs/sms/twiml#request-parameters>.
//! A TwiML response to this webhook is processed, so the handler can reply with
//! an automated message.
//!
//! Attachments arrive as indexed `MediaContentType{N}` / `MediaUrl{N}` pairs.
//! They are collected into a fixed [`Media`] array of [`MEDIA_SLOTS`] items;
//! indices past the last slot are not representable and get dropped.

use super::fields;
use crate::{
    consts::{MEDIA_CONTENT_TYPE_PREFIX, MEDIA_SLOTS, MEDIA_URL_PREFIX},
    errors::DecodeError,
    models::{CanonicalStatus, InvalidStatus, SmsStatus},
};
use log::trace;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::Error,
    ser::SerializeMap,
};
use std::collections::BTreeMap;

/// One attachment of an MMS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaItem {
    /// MIME type of the media stored at `url`
    pub content_type: String,
    pub url: String,
}

impl MediaItem {
    pub fn is_empty(&self) -> bool {
        self.content_type.is_empty() && self.url.is_empty()
    }
}

/// Media slots 0..=10 in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media([MediaItem; MEDIA_SLOTS]);

#[derive(Debug, Clone, Copy, PartialEq)]
enum MediaField {
    ContentType,
    Url,
}

impl Media {
    pub fn new(items: [MediaItem; MEDIA_SLOTS]) -> Self {
        Self(items)
    }

    /// Item at `index`, `None` past the last slot.
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.0.get(index)
    }

    pub fn slots(&self) -> &[MediaItem; MEDIA_SLOTS] {
        &self.0
    }

    /// Non-empty items with their index.
    pub fn populated(&self) -> impl Iterator<Item = (usize, &MediaItem)> {
        self.0.iter().enumerate().filter(|(_, item)| !item.is_empty())
    }

    fn field_mut(&mut self, field: MediaField, index: usize) -> Option<&mut String> {
        let item = self.0.get_mut(index)?;
        Some(match field {
            MediaField::ContentType => &mut item.content_type,
            MediaField::Url => &mut item.url,
        })
    }
}

/// Splits `MediaUrl3` into its field and index.
///
/// Only canonical decimal indices match, `MediaUrl03` or `MediaUrl+3` do not.
fn parse_media_key(key: &str) -> Option<(MediaField, usize)> {
    let (field, index) = if let Some(index) = key.strip_prefix(MEDIA_CONTENT_TYPE_PREFIX) {
        (MediaField::ContentType, index)
    } else if let Some(index) = key.strip_prefix(MEDIA_URL_PREFIX) {
        (MediaField::Url, index)
    } else {
        return None;
    };

    let parsed = index.parse::<usize>().ok()?;
    (parsed.to_string() == index).then_some((field, parsed))
}

impl<'de> Deserialize<'de> for Media {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // receives every key the surrounding record did not declare
        let entries = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut media = Media::default();

        for (key, value) in entries {
            let Some((field, index)) = parse_media_key(&key) else {
                continue;
            };
            let Some(slot) = media.field_mut(field, index) else {
                trace!("dropping {key}: only {MEDIA_SLOTS} media slots");
                continue;
            };
            match value {
                serde_json::Value::String(value) => *slot = value,
                serde_json::Value::Null => {}
                other => {
                    return Err(D::Error::custom(format!(
                        "invalid value for {key}: expected a string, got {other}"
                    )));
                }
            }
        }

        Ok(media)
    }
}

impl Serialize for Media {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (index, item) in self.populated() {
            if !item.content_type.is_empty() {
                map.serialize_entry(
                    &format!("{MEDIA_CONTENT_TYPE_PREFIX}{index}"),
                    &item.content_type,
                )?;
            }
            if !item.url.is_empty() {
                map.serialize_entry(&format!("{MEDIA_URL_PREFIX}{index}"), &item.url)?;
            }
        }
        map.end()
    }
}

/// Webhook received for an inbound SMS.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsWebhook {
    #[serde(rename = "AccountSid", deserialize_with = "fields::deserialize_text")]
    pub account_sid: String,
    #[serde(rename = "ApiVersion", deserialize_with = "fields::deserialize_text")]
    pub api_version: String,

    #[serde(rename = "Body", deserialize_with = "fields::deserialize_text")]
    pub body: String,
    #[serde(rename = "SmsSid", deserialize_with = "fields::deserialize_text")]
    pub sms_sid: String,
    #[serde(rename = "MessageSid", deserialize_with = "fields::deserialize_text")]
    pub message_sid: String,
    #[serde(rename = "NumMedia", deserialize_with = "fields::deserialize_text")]
    pub num_media: String,
    #[serde(rename = "NumSegments", deserialize_with = "fields::deserialize_text")]
    pub num_segments: String,
    #[serde(rename = "SmsStatus", deserialize_with = "fields::deserialize_text")]
    pub sms_status: String,
    #[serde(rename = "SmsMessageSid", deserialize_with = "fields::deserialize_text")]
    pub sms_message_sid: String,

    #[serde(rename = "To", deserialize_with = "fields::deserialize_text")]
    pub to: String,
    #[serde(rename = "ToCity", deserialize_with = "fields::deserialize_text")]
    pub to_city: String,
    #[serde(rename = "ToState", deserialize_with = "fields::deserialize_text")]
    pub to_state: String,
    #[serde(rename = "ToZip", deserialize_with = "fields::deserialize_text")]
    pub to_zip: String,
    #[serde(rename = "ToCountry", deserialize_with = "fields::deserialize_text")]
    pub to_country: String,
    #[serde(rename = "From", deserialize_with = "fields::deserialize_text")]
    pub from: String,
    #[serde(rename = "FromCity", deserialize_with = "fields::deserialize_text")]
    pub from_city: String,
    #[serde(rename = "FromState", deserialize_with = "fields::deserialize_text")]
    pub from_state: String,
    #[serde(rename = "FromZip", deserialize_with = "fields::deserialize_text")]
    pub from_zip: String,
    #[serde(rename = "FromCountry", deserialize_with = "fields::deserialize_text")]
    pub from_country: String,

    /// `MediaContentType{N}` / `MediaUrl{N}` pairs
    #[serde(flatten)]
    pub media: Media,
}

impl SmsWebhook {
    pub fn sms_status(&self) -> Result<SmsStatus, InvalidStatus<SmsStatus>> {
        SmsStatus::parse(&self.sms_status)
    }

    /// Parses `NumMedia`, an absent value counts as no media.
    pub fn num_media(&self) -> Result<usize, DecodeError> {
        if self.num_media.is_empty() {
            return Ok(0);
        }
        self.num_media.parse().map_err(|err| {
            DecodeError::InvalidNumber(format!("NumMedia {:?}: {err}", self.num_media))
        })
    }

    /// Attachments in index order, skipping empty slots.
    pub fn media(&self) -> Vec<&MediaItem> {
        self.media.populated().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webhook::decoder::{decode_form, decode_json, decode_values};

    const MMS_JSON: &str = r#"{
        "AccountSid": "AC1",
        "ApiVersion": "2010-04-01",
        "Body": "look at this",
        "SmsSid": "SM1",
        "MessageSid": "SM1",
        "NumMedia": "1",
        "NumSegments": "1",
        "SmsStatus": "received",
        "SmsMessageSid": "SM1",
        "To": "+15559998888",
        "ToCity": "SAN FRANCISCO",
        "ToState": "CA",
        "ToZip": "94105",
        "ToCountry": "US",
        "From": "+15551230000",
        "FromCity": "OAKLAND",
        "FromState": "CA",
        "FromZip": "94612",
        "FromCountry": "US",
        "MediaContentType0": "image/png",
        "MediaUrl0": "http://x/1.png"
    }"#;

    #[test]
    fn test_decode_json_all_fields() {
        let hook: SmsWebhook = decode_json(MMS_JSON.as_bytes()).unwrap();

        assert_eq!(hook.account_sid, "AC1");
        assert_eq!(hook.api_version, "2010-04-01");
        assert_eq!(hook.body, "look at this");
        assert_eq!(hook.sms_sid, "SM1");
        assert_eq!(hook.message_sid, "SM1");
        assert_eq!(hook.num_segments, "1");
        assert_eq!(hook.sms_message_sid, "SM1");
        assert_eq!(hook.to, "+15559998888");
        assert_eq!(hook.to_city, "SAN FRANCISCO");
        assert_eq!(hook.to_state, "CA");
        assert_eq!(hook.to_zip, "94105");
        assert_eq!(hook.to_country, "US");
        assert_eq!(hook.from, "+15551230000");
        assert_eq!(hook.from_city, "OAKLAND");
        assert_eq!(hook.from_state, "CA");
        assert_eq!(hook.from_zip, "94612");
        assert_eq!(hook.from_country, "US");
        assert_eq!(hook.num_media(), Ok(1));
    }

    #[test]
    fn test_media_index_zero_only() {
        let hook: SmsWebhook = decode_json(MMS_JSON.as_bytes()).unwrap();

        assert_eq!(
            hook.media.get(0),
            Some(&MediaItem {
                content_type: "image/png".into(),
                url: "http://x/1.png".into(),
            })
        );
        assert_eq!(hook.media.get(1), Some(&MediaItem::default()));
        assert_eq!(hook.media.get(MEDIA_SLOTS), None);
        assert_eq!(hook.media().len(), 1);
    }

    #[test]
    fn test_media_bounds() {
        let hook: SmsWebhook = decode_values([
            ("MediaUrl10", "http://x/10.png"),
            ("MediaContentType10", "image/png"),
            ("MediaUrl11", "http://x/11.png"),
            ("MediaUrl01", "http://x/01.png"),
            ("MediaUrl", "http://x/none.png"),
            ("mediaurl2", "http://x/2.png"),
        ])
        .unwrap();

        let populated: Vec<_> = hook.media.populated().map(|(index, _)| index).collect();
        assert_eq!(populated, vec![10]);
        assert_eq!(hook.media.slots()[10].url, "http://x/10.png");
        assert_eq!(hook.media.slots()[1], MediaItem::default());
    }

    #[test]
    fn test_media_order_follows_index() {
        let hook: SmsWebhook = decode_form(
            b"MediaUrl2=http%3A%2F%2Fx%2F2.png&MediaUrl0=http%3A%2F%2Fx%2F0.png&NumMedia=3",
        )
        .unwrap();

        let urls: Vec<_> = hook.media().iter().map(|item| item.url.as_str()).collect();
        assert_eq!(urls, vec!["http://x/0.png", "http://x/2.png"]);
        assert_eq!(hook.media.get(1), Some(&MediaItem::default()));
    }

    #[test]
    fn test_null_and_wrong_type() {
        let hook: SmsWebhook =
            decode_json(br#"{"MediaUrl0": null, "Extra": 42}"#).unwrap();
        assert_eq!(hook.media, Media::default());

        let hook: SmsWebhook = decode_json(
            br#"{"Body": null, "From": "+15551230000", "SmsStatus": null, "MediaUrl0": null}"#,
        )
        .unwrap();
        assert_eq!(hook.body, "");
        assert_eq!(hook.sms_status, "");
        assert_eq!(hook.from, "+15551230000");

        assert!(decode_json::<SmsWebhook>(br#"{"MediaUrl0": 42}"#).is_err());
        assert!(decode_json::<SmsWebhook>(br#"{"Body": 42}"#).is_err());
    }

    #[test]
    fn test_form_and_json_agree() {
        let from_json: SmsWebhook = decode_json(MMS_JSON.as_bytes()).unwrap();
        let form: BTreeMap<String, String> = serde_json::from_str(MMS_JSON).unwrap();
        let from_form: SmsWebhook = decode_values(&form).unwrap();
        assert_eq!(from_json, from_form);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let hook: SmsWebhook = decode_json(MMS_JSON.as_bytes()).unwrap();
        let value = serde_json::to_value(&hook).unwrap();
        assert_eq!(value["SmsSid"], "SM1");
        assert_eq!(value["MediaUrl0"], "http://x/1.png");
        assert_eq!(value["MediaContentType0"], "image/png");
        assert!(value.get("MediaUrl1").is_none());

        let back: SmsWebhook = serde_json::from_value(value).unwrap();
        assert_eq!(back, hook);
    }

    #[test]
    fn test_status_and_num_media() {
        let hook = SmsWebhook {
            sms_status: "delivered".into(),
            num_media: "two".into(),
            ..Default::default()
        };
        assert_eq!(hook.sms_status(), Ok(SmsStatus::Delivered));
        assert!(matches!(hook.num_media(), Err(DecodeError::InvalidNumber(_))));
        assert_eq!(SmsWebhook::default().num_media(), Ok(0));
    }
}
