//! Message and call status vocabularies reported by Twilio callbacks.
//!
//! Both enums convert to their canonical wire string through [`Display`] /
//! [`CanonicalStatus::as_str`] and back through [`CanonicalStatus::parse`].
//! Matching is exact and case-sensitive.
//!
//! # Fallback on failure
//!
//! A failed parse still hands out a status: [`InvalidStatus::fallback`] is always
//! the `Failed` member of the enum. That value says nothing about the payload, so
//! never use it without first looking at the error.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed set of statuses sharing one canonical string per member.
pub trait CanonicalStatus: Copy + PartialEq + fmt::Debug + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];
    /// Member handed back alongside a parse error.
    const FALLBACK: Self;
    /// Short label used in error messages ("sms", "voice").
    const KIND: &'static str;

    fn as_str(self) -> &'static str;

    /// Scans the canonical strings for an exact match.
    fn parse(input: &str) -> Result<Self, InvalidStatus<Self>> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == input)
            .ok_or_else(|| InvalidStatus {
                input: input.to_string(),
                fallback: Self::FALLBACK,
            })
    }

    /// Parses `input` and returns the fallback together with the error on failure.
    fn parse_or_fallback(input: &str) -> (Self, Option<InvalidStatus<Self>>) {
        match Self::parse(input) {
            Ok(status) => (status, None),
            Err(err) => (err.fallback, Some(err)),
        }
    }
}

/// Status of an SMS reported by the messaging webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum SmsStatus {
    #[display("queued")]
    #[serde(rename = "queued")]
    Queued,
    #[display("failed")]
    #[serde(rename = "failed")]
    Failed,
    #[display("sent")]
    #[serde(rename = "sent")]
    Sent,
    #[display("delivered")]
    #[serde(rename = "delivered")]
    Delivered,
    #[display("undelivered")]
    #[serde(rename = "undelivered")]
    Undelivered,
}

impl CanonicalStatus for SmsStatus {
    const ALL: &'static [Self] = &[
        SmsStatus::Queued,
        SmsStatus::Failed,
        SmsStatus::Sent,
        SmsStatus::Delivered,
        SmsStatus::Undelivered,
    ];
    const FALLBACK: Self = SmsStatus::Failed;
    const KIND: &'static str = "sms";

    fn as_str(self) -> &'static str {
        match self {
            SmsStatus::Queued => "queued",
            SmsStatus::Failed => "failed",
            SmsStatus::Sent => "sent",
            SmsStatus::Delivered => "delivered",
            SmsStatus::Undelivered => "undelivered",
        }
    }
}

/// Status of a voice call reported by the call webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deserialize, Serialize)]
pub enum VoiceStatus {
    #[display("queued")]
    #[serde(rename = "queued")]
    Queued,
    #[display("ringing")]
    #[serde(rename = "ringing")]
    Ringing,
    #[display("in-progress")]
    #[serde(rename = "in-progress")]
    InProgress,
    #[display("completed")]
    #[serde(rename = "completed")]
    Completed,
    #[display("busy")]
    #[serde(rename = "busy")]
    Busy,
    #[display("failed")]
    #[serde(rename = "failed")]
    Failed,
    #[display("no-answer")]
    #[serde(rename = "no-answer")]
    NoAnswer,
}

impl CanonicalStatus for VoiceStatus {
    const ALL: &'static [Self] = &[
        VoiceStatus::Queued,
        VoiceStatus::Ringing,
        VoiceStatus::InProgress,
        VoiceStatus::Completed,
        VoiceStatus::Busy,
        VoiceStatus::Failed,
        VoiceStatus::NoAnswer,
    ];
    const FALLBACK: Self = VoiceStatus::Failed;
    const KIND: &'static str = "voice";

    fn as_str(self) -> &'static str {
        match self {
            VoiceStatus::Queued => "queued",
            VoiceStatus::Ringing => "ringing",
            VoiceStatus::InProgress => "in-progress",
            VoiceStatus::Completed => "completed",
            VoiceStatus::Busy => "busy",
            VoiceStatus::Failed => "failed",
            VoiceStatus::NoAnswer => "no-answer",
        }
    }
}

impl FromStr for SmsStatus {
    type Err = InvalidStatus<SmsStatus>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for VoiceStatus {
    type Err = InvalidStatus<VoiceStatus>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Input did not match any canonical status string.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidStatus<S> {
    pub input: String,
    pub fallback: S,
}

impl<S: CanonicalStatus> InvalidStatus<S> {
    /// The `Failed` member returned in place of a real status.
    pub fn fallback(&self) -> S {
        self.fallback
    }
}

impl<S: CanonicalStatus> fmt::Display for InvalidStatus<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} status: {:?}", S::KIND, self.input)
    }
}

impl<S: CanonicalStatus> std::error::Error for InvalidStatus<S> {}
