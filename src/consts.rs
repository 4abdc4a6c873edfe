/// Number of `MediaContentType{N}` / `MediaUrl{N}` pairs an SMS webhook can carry (indices 0..=10).
pub const MEDIA_SLOTS: usize = 11;

pub const MEDIA_CONTENT_TYPE_PREFIX: &str = "MediaContentType";
pub const MEDIA_URL_PREFIX: &str = "MediaUrl";

/// Default upper bound for a raw webhook body handed to the decoder.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
