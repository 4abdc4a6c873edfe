use derive_more::{Display, Error};

/// Failure while turning a webhook payload into a typed record.
///
/// Decoding is all-or-nothing: whenever one of these is returned no record was
/// produced, so the caller never sees a partially populated payload.
#[derive(Debug, Display, Error, PartialEq)]
pub enum DecodeError {
    /// Form fields could not be mapped onto the record, e.g. a bad timestamp.
    #[display("malformed form payload: {_0}")]
    MalformedForm(#[error(not(source))] String),
    #[display("malformed json payload: {_0}")]
    MalformedJson(#[error(not(source))] String),
    /// The `interactionData` field does not hold the expected JSON document.
    #[display("malformed interaction data: {_0}")]
    MalformedInteractionData(#[error(not(source))] String),
    #[display("invalid timestamp: {_0}")]
    InvalidTimestamp(#[error(not(source))] String),
    #[display("invalid number: {_0}")]
    InvalidNumber(#[error(not(source))] String),
    #[display("payload of {size} bytes exceeds the {limit} bytes limit")]
    PayloadTooLarge { size: usize, limit: usize },
}
