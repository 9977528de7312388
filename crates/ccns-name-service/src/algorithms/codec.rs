//! # Message Codec
//!
//! Wire encoding for registration messages carried by the transport.
//!
//! The codec is strict in both directions: a payload decodes only if a
//! matching [`encode_message`] produced it. Truncated input, trailing bytes,
//! unknown operation tags and oversized payloads all fail with
//! [`NameServiceError::MalformedPayload`].

use crate::domain::{NameServiceError, RegistrationMessage};
use bincode::Options;

/// Upper bound for a serialized registration message.
///
/// Generous for any realistic name; rejects garbage that claims huge string
/// lengths before allocation.
pub const MAX_PAYLOAD_BYTES: u64 = 4096;

fn codec_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_PAYLOAD_BYTES)
        .reject_trailing_bytes()
}

/// Serialize a registration message into a transport payload.
pub fn encode_message(message: &RegistrationMessage) -> Result<Vec<u8>, NameServiceError> {
    codec_options()
        .serialize(message)
        .map_err(|e| NameServiceError::MalformedPayload(e.to_string()))
}

/// Parse a transport payload back into a registration message.
pub fn decode_message(payload: &[u8]) -> Result<RegistrationMessage, NameServiceError> {
    codec_options()
        .deserialize(payload)
        .map_err(|e| NameServiceError::MalformedPayload(e.to_string()))
}
