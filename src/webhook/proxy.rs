//! # Twilio Proxy Webhook Schemas
//!
//! Form payloads posted by Twilio Proxy, see
//! <https://www.twilio.com/docs/proxy/api/proxy-webhooks>.
//!
//! The interaction callbacks use lower camel case names, while the out-of-session
//! callback mixes them with the PascalCase names of the underlying SMS and voice
//! webhooks. Every field is mapped to its exact wire name.

use super::fields;
use crate::{
    errors::DecodeError,
    models::{CanonicalStatus, InvalidStatus, SmsStatus, VoiceStatus},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON document embedded in the `interactionData` field
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct InteractionData {
    /// Message text of the interaction
    #[serde(default, rename = "body")]
    pub body: String,
}

impl InteractionData {
    /// Decodes the raw `interactionData` string.
    pub fn from_raw(raw: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(raw)
            .map_err(|err| DecodeError::MalformedInteractionData(err.to_string()))
    }
}

/// Fired for each new interaction, informational only.
///
/// <https://www.twilio.com/docs/proxy/api/proxy-webhooks#callbackurl>
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyCallbackWebhook {
    #[serde(rename = "outboundResourceStatus", deserialize_with = "fields::deserialize_text")]
    pub outbound_resource_status: String,
    #[serde(rename = "outboundResourceType", deserialize_with = "fields::deserialize_text")]
    pub outbound_resource_type: String,
    #[serde(
        rename = "interactionDateUpdated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub interaction_date_updated: Option<DateTime<Utc>>,
    /// JSON encoded, see [`ProxyCallbackWebhook::interaction_data`]
    #[serde(rename = "interactionData", deserialize_with = "fields::deserialize_text")]
    pub interaction_data: String,
    #[serde(
        rename = "interactionDateCreated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub interaction_date_created: Option<DateTime<Utc>>,
    #[serde(rename = "inboundResourceUrl", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_url: String,
    #[serde(rename = "interactionServiceSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_service_sid: String,
    #[serde(rename = "outboundParticipantSid", deserialize_with = "fields::deserialize_text")]
    pub outbound_participant_sid: String,
    #[serde(rename = "interactionType", deserialize_with = "fields::deserialize_text")]
    pub interaction_type: String,
    #[serde(rename = "interactionAccountSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_account_sid: String,
    #[serde(rename = "inboundParticipantSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_sid: String,
    #[serde(rename = "inboundResourceStatus", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_status: String,
    #[serde(rename = "outboundResourceSid", deserialize_with = "fields::deserialize_text")]
    pub outbound_resource_sid: String,
    #[serde(rename = "outboundResourceUrl", deserialize_with = "fields::deserialize_text")]
    pub outbound_resource_url: String,
    #[serde(rename = "inboundResourceType", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_type: String,
    #[serde(rename = "inboundResourceSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_sid: String,
    #[serde(rename = "interactionSessionSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_session_sid: String,
    #[serde(rename = "interactionSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_sid: String,
}

impl ProxyCallbackWebhook {
    /// Decodes the JSON held in `interactionData`.
    pub fn interaction_data(&self) -> Result<InteractionData, DecodeError> {
        InteractionData::from_raw(&self.interaction_data)
    }
}

/// Fired on each interaction before it happens.
///
/// Answering with a 403 blocks the interaction, any other status or a timeout
/// lets it continue.
///
/// <https://www.twilio.com/docs/proxy/api/proxy-webhooks#interceptcallbackurl>
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyInterceptCallbackWebhook {
    #[serde(
        rename = "interactionDateUpdated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub interaction_date_updated: Option<DateTime<Utc>>,
    #[serde(rename = "interactionData", deserialize_with = "fields::deserialize_text")]
    pub interaction_data: String,
    #[serde(
        rename = "interactionDateCreated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub interaction_date_created: Option<DateTime<Utc>>,
    #[serde(rename = "inboundResourceUrl", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_url: String,
    #[serde(rename = "interactionServiceSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_service_sid: String,
    #[serde(rename = "interactionType", deserialize_with = "fields::deserialize_text")]
    pub interaction_type: String,
    #[serde(rename = "interactionAccountSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_account_sid: String,
    #[serde(rename = "inboundParticipantSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_sid: String,
    #[serde(rename = "inboundResourceStatus", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_status: String,
    #[serde(rename = "inboundResourceType", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_type: String,
    #[serde(rename = "inboundResourceSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_resource_sid: String,
    #[serde(rename = "interactionSessionSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_session_sid: String,
    #[serde(rename = "interactionSid", deserialize_with = "fields::deserialize_text")]
    pub interaction_sid: String,
}

impl ProxyInterceptCallbackWebhook {
    /// Decodes the JSON held in `interactionData`.
    pub fn interaction_data(&self) -> Result<InteractionData, DecodeError> {
        InteractionData::from_raw(&self.interaction_data)
    }
}

/// Sent when an inbound call or SMS has no session, or its session is closed.
///
/// A valid TwiML response is processed, so the handler can e.g. play a message,
/// reply with a text or redirect the call to another number.
///
/// <https://www.twilio.com/docs/proxy/api/proxy-webhooks#outofsessioncallbackurl>
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyOutOfSessionCallbackWebhook {
    #[serde(rename = "AccountSid", deserialize_with = "fields::deserialize_text")]
    pub account_sid: String,
    #[serde(rename = "sessionUniqueName", deserialize_with = "fields::deserialize_text")]
    pub session_unique_name: String,
    #[serde(rename = "sessionAccountSid", deserialize_with = "fields::deserialize_text")]
    pub session_account_sid: String,
    #[serde(rename = "sessionServiceSid", deserialize_with = "fields::deserialize_text")]
    pub session_service_sid: String,
    #[serde(rename = "sessionSid", deserialize_with = "fields::deserialize_text")]
    pub session_sid: String,
    #[serde(rename = "sessionStatus", deserialize_with = "fields::deserialize_text")]
    pub session_status: String,
    #[serde(rename = "sessionMode", deserialize_with = "fields::deserialize_text")]
    pub session_mode: String,
    #[serde(
        rename = "sessionDateCreated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub session_date_created: Option<DateTime<Utc>>,
    #[serde(
        rename = "sessionDateStarted",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub session_date_started: Option<DateTime<Utc>>,
    #[serde(
        rename = "sessionDateUpdated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub session_date_updated: Option<DateTime<Utc>>,
    #[serde(
        rename = "sessionDateEnded",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub session_date_ended: Option<DateTime<Utc>>,
    #[serde(
        rename = "sessionDateLastInteraction",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub session_date_last_interaction: Option<DateTime<Utc>>,
    #[serde(rename = "sessionClosedReason", deserialize_with = "fields::deserialize_text")]
    pub session_closed_reason: String,
    #[serde(rename = "ttl", deserialize_with = "fields::deserialize_text")]
    pub ttl: String,

    // sms
    #[serde(rename = "Body", deserialize_with = "fields::deserialize_text")]
    pub body: String,
    #[serde(rename = "SmsSid", deserialize_with = "fields::deserialize_text")]
    pub sms_sid: String,
    #[serde(rename = "MessageSid", deserialize_with = "fields::deserialize_text")]
    pub message_sid: String,
    /// Set on message status callbacks
    #[serde(rename = "MessageStatus", deserialize_with = "fields::deserialize_text")]
    pub message_status: String,
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

    #[serde(rename = "inboundParticipantSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_sid: String,
    #[serde(rename = "inboundParticipantIdentifier", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_identifier: String,
    #[serde(
        rename = "inboundParticipantFriendlyName",
        deserialize_with = "fields::deserialize_text"
    )]
    pub inbound_participant_friendly_name: String,
    #[serde(
        rename = "inboundParticipantProxyIdentifier",
        deserialize_with = "fields::deserialize_text"
    )]
    pub inbound_participant_proxy_identifier: String,
    #[serde(
        rename = "inboundParticipantProxyIdentifierSid",
        deserialize_with = "fields::deserialize_text"
    )]
    pub inbound_participant_proxy_identifier_sid: String,
    #[serde(rename = "inboundParticipantAccountSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_account_sid: String,
    #[serde(rename = "inboundParticipantServiceSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_service_sid: String,
    #[serde(rename = "inboundParticipantSessionSid", deserialize_with = "fields::deserialize_text")]
    pub inbound_participant_session_sid: String,
    #[serde(
        rename = "inboundParticipantDateCreated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub inbound_participant_date_created: Option<DateTime<Utc>>,
    #[serde(
        rename = "inboundParticipantDateUpdated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub inbound_participant_date_updated: Option<DateTime<Utc>>,

    #[serde(rename = "outboundParticipantSid", deserialize_with = "fields::deserialize_text")]
    pub outbound_participant_sid: String,
    #[serde(
        rename = "outboundParticipantIdentifier",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_identifier: String,
    #[serde(
        rename = "outboundParticipantFriendlyName",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_friendly_name: String,
    #[serde(
        rename = "outboundParticipantProxyIdentifier",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_proxy_identifier: String,
    #[serde(
        rename = "outboundParticipantProxyIdentifierSid",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_proxy_identifier_sid: String,
    #[serde(
        rename = "outboundParticipantAccountSid",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_account_sid: String,
    #[serde(
        rename = "outboundParticipantServiceSid",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_service_sid: String,
    #[serde(
        rename = "outboundParticipantSessionSid",
        deserialize_with = "fields::deserialize_text"
    )]
    pub outbound_participant_session_sid: String,
    #[serde(
        rename = "outboundParticipantDateCreated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub outbound_participant_date_created: Option<DateTime<Utc>>,
    #[serde(
        rename = "outboundParticipantDateUpdated",
        deserialize_with = "fields::deserialize_timestamp"
    )]
    pub outbound_participant_date_updated: Option<DateTime<Utc>>,

    // voice
    #[serde(rename = "CallSid", deserialize_with = "fields::deserialize_text")]
    pub call_sid: String,
    #[serde(rename = "CallStatus", deserialize_with = "fields::deserialize_text")]
    pub call_status: String,

    #[serde(rename = "Caller", deserialize_with = "fields::deserialize_text")]
    pub caller: String,
    #[serde(rename = "CallerCity", deserialize_with = "fields::deserialize_text")]
    pub caller_city: String,
    #[serde(rename = "CallerState", deserialize_with = "fields::deserialize_text")]
    pub caller_state: String,
    #[serde(rename = "CallerZip", deserialize_with = "fields::deserialize_text")]
    pub caller_zip: String,
    #[serde(rename = "CallerCountry", deserialize_with = "fields::deserialize_text")]
    pub caller_country: String,

    #[serde(rename = "Called", deserialize_with = "fields::deserialize_text")]
    pub called: String,
    #[serde(rename = "CalledCity", deserialize_with = "fields::deserialize_text")]
    pub called_city: String,
    #[serde(rename = "CalledState", deserialize_with = "fields::deserialize_text")]
    pub called_state: String,
    #[serde(rename = "CalledZip", deserialize_with = "fields::deserialize_text")]
    pub called_zip: String,
    #[serde(rename = "CalledCountry", deserialize_with = "fields::deserialize_text")]
    pub called_country: String,

    #[serde(rename = "Direction", deserialize_with = "fields::deserialize_text")]
    pub direction: String,
    #[serde(rename = "AddOns", deserialize_with = "fields::deserialize_text")]
    pub add_ons: String,
    #[serde(rename = "ApiVersion", deserialize_with = "fields::deserialize_text")]
    pub api_version: String,

    // sent by the <Gather> TwiML verb
    #[serde(rename = "Digits", deserialize_with = "fields::deserialize_text")]
    pub digits: String,
    #[serde(rename = "FinishedOnKey", deserialize_with = "fields::deserialize_text")]
    pub finished_on_key: String,
    #[serde(rename = "msg", deserialize_with = "fields::deserialize_text")]
    pub msg: String,
    /// UTC in RFC 2822 format, see [`ProxyOutOfSessionCallbackWebhook::timestamp`]
    #[serde(rename = "Timestamp", deserialize_with = "fields::deserialize_text")]
    pub timestamp: String,
    #[serde(rename = "CallbackSource", deserialize_with = "fields::deserialize_text")]
    pub callback_source: String,
    #[serde(rename = "SequenceNumber", deserialize_with = "fields::deserialize_text")]
    pub sequence_number: String,

    /// Set on failed status callbacks
    #[serde(rename = "ErrorCode", deserialize_with = "fields::deserialize_text")]
    pub error_code: String,
}

impl ProxyOutOfSessionCallbackWebhook {
    pub fn sms_status(&self) -> Result<SmsStatus, InvalidStatus<SmsStatus>> {
        SmsStatus::parse(&self.sms_status)
    }

    pub fn message_status(&self) -> Result<SmsStatus, InvalidStatus<SmsStatus>> {
        SmsStatus::parse(&self.message_status)
    }

    pub fn call_status(&self) -> Result<VoiceStatus, InvalidStatus<VoiceStatus>> {
        VoiceStatus::parse(&self.call_status)
    }

    /// Parses the RFC 2822 `Timestamp` field, `None` when it was not sent.
    pub fn timestamp(&self) -> Result<Option<DateTime<Utc>>, DecodeError> {
        fields::parse_rfc2822(&self.timestamp).map_err(|err| {
            DecodeError::InvalidTimestamp(format!("{:?}: {err}", self.timestamp))
        })
    }
}
