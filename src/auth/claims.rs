//! Claim extraction from the bearer credential.
//!
//! The credential is a compact JWT; `decode` unpacks its payload segment
//! and returns the claims as a plain map. No signature verification
//! happens here - the claims are trusted only for display and UI hints,
//! and every authorization decision is re-validated server-side.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};
use thiserror::Error;

/// Decoded, unverified claims of the current credential.
pub type Identity = Map<String, Value>;

#[derive(Error, Debug)]
pub enum ClaimsError {
    #[error("Malformed token: expected three dot-separated segments")]
    MalformedToken,

    #[error("Invalid claim payload encoding: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    #[error("Invalid claim payload: {0}")]
    PayloadJson(#[from] serde_json::Error),

    #[error("Claim payload is not a JSON object")]
    NotAnObject,
}

/// Decode the claim payload of a compact JWT without verifying it.
/// Pure function of its input; malformed input is a typed error that the
/// caller treats as "identity absent".
pub fn decode(token: &str) -> Result<Identity, ClaimsError> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(ClaimsError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(map) => Ok(map),
        _ => Err(ClaimsError::NotAnObject),
    }
}

/// The `sub` claim, if present and a string.
pub fn subject(identity: &Identity) -> Option<&str> {
    identity.get("sub").and_then(Value::as_str)
}
