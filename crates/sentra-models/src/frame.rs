//! Inbound frame payload parsing.
//!
//! Clients send each frame as a data-URL-style text message:
//! `<prefix>,<base64 image bytes>`, e.g. `data:image/jpeg;base64,/9j/4AAQ...`.
//! Only the portion after the first comma is treated as payload; the prefix
//! is kept for logging but never interpreted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Errors raised while parsing an inbound frame message.
///
/// These are classified so the connection handler can distinguish a bad
/// frame (recoverable, skip it) from a transport failure (fatal).
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("payload has no comma separator")]
    MissingSeparator,

    #[error("payload base64 section is empty")]
    EmptyImage,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A parsed view over one inbound text frame message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePayload<'a> {
    /// Data-URL prefix (everything before the first comma), e.g.
    /// `data:image/jpeg;base64`. Logged, never interpreted.
    pub prefix: &'a str,
    /// Base64 section (everything after the first comma).
    pub encoded: &'a str,
}

impl<'a> FramePayload<'a> {
    /// Split a raw text message into prefix and base64 sections.
    ///
    /// Splits on the FIRST comma only, so media-type parameters in the
    /// prefix survive and the payload itself is taken whole.
    pub fn parse(raw: &'a str) -> Result<Self, ProtocolError> {
        let (prefix, encoded) = raw.split_once(',').ok_or(ProtocolError::MissingSeparator)?;
        if encoded.is_empty() {
            return Err(ProtocolError::EmptyImage);
        }
        Ok(Self { prefix, encoded })
    }

    /// Decode the base64 section into raw image bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ProtocolError> {
        let bytes = BASE64.decode(self.encoded.trim())?;
        if bytes.is_empty() {
            return Err(ProtocolError::EmptyImage);
        }
        Ok(bytes)
    }
}

/// Parse and decode in one step.
pub fn decode_data_url(raw: &str) -> Result<Vec<u8>, ProtocolError> {
    FramePayload::parse(raw)?.decode()
}
