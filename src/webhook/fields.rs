//! Serde helpers for the text and timestamp fields of the webhook records.
//!
//! Form values always arrive as strings, JSON bodies may also carry `null` for a
//! field that was not set. Both helpers accept either and are meant to be used
//! together with `#[serde(default)]` so missing keys keep their default.

use chrono::{DateTime, Utc};
use serde::{
    Deserializer,
    de::{Error, Visitor},
};
use std::fmt;

struct OptionalText;

impl<'de> Visitor<'de> for OptionalText {
    type Value = Option<String>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or null")
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(value.to_string()))
    }

    fn visit_string<E: Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(value))
    }

    fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Deserializes a text field, `null` leaves it empty.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer
        .deserialize_any(OptionalText)?
        .unwrap_or_default())
}

/// Deserializes an optional RFC 3339 timestamp.
///
/// `null` and the empty string both count as an absent field.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = deserializer.deserialize_any(OptionalText)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|date| Some(date.with_timezone(&Utc)))
        .map_err(|err| D::Error::custom(format!("invalid timestamp {raw:?}: {err}")))
}

/// Parses the RFC 2822 `Timestamp` text some call callbacks carry.
pub fn parse_rfc2822(raw: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(DateTime::parse_from_rfc2822(raw)?.with_timezone(&Utc)))
}
