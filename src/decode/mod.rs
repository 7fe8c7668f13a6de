//! Lenient response decoding
//!
//! Some upstream servers return JSON-shaped text without a JSON content
//! type, and some return plain text where JSON was expected. Rather than
//! swallowing decode failures, the outcome is an explicit sum type the
//! caller branches on.

use serde_json::Value;

/// Result of a lenient decode attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The body parsed as JSON
    Structured(Value),
    /// The body was not valid JSON; kept verbatim
    Raw(String),
}

impl Decoded {
    /// The parsed value, if the body was structured
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Whether the body parsed as JSON
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

/// Attempt a JSON decode, falling back to the raw text.
///
/// Never fails: an undecodable body becomes [`Decoded::Raw`] and the
/// caller decides how far to degrade.
pub fn decode_lenient(body: &str) -> Decoded {
    match serde_json::from_str(body) {
        Ok(value) => Decoded::Structured(value),
        Err(_) => Decoded::Raw(body.to_string()),
    }
}
