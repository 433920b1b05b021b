//! Frame encoding
//!
//! The codec sits between raw WebSocket text and JSON values so an
//! alternative wire encoding can be swapped in without touching dispatch.

use serde_json::Value;

use super::ClientFrame;

/// Encoding or decoding failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("codec error: {message}")]
pub struct CodecError {
    pub message: String,
}

impl CodecError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Converts between wire text and frames
pub trait FrameCodec: Send + Sync {
    /// Decode one inbound text frame
    fn decode(&self, text: &str) -> Result<Value, CodecError>;

    /// Encode one outbound frame
    fn encode(&self, frame: &ClientFrame) -> Result<String, CodecError>;
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl FrameCodec for SerdeJsonCodec {
    fn decode(&self, text: &str) -> Result<Value, CodecError> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(CodecError::new("frame is not a JSON object"));
        }
        Ok(value)
    }

    fn encode(&self, frame: &ClientFrame) -> Result<String, CodecError> {
        Ok(serde_json::to_string(frame)?)
    }
}
