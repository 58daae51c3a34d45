use std::fmt;

use serde::Serialize;

use crate::error::InvalidPayload;

/// A complete text message, after reassembly. Always valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TextMessage {
    payload: String,
}

impl TextMessage {
    pub fn new<T: Into<String>>(payload: T) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Takes ownership of raw bytes, failing with `InvalidUtf8` if they do not decode.
    pub fn from_utf8(payload: Vec<u8>) -> Result<Self, InvalidPayload> {
        let payload = String::from_utf8(payload).map_err(|e| e.utf8_error())?;
        Ok(Self { payload })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }
}

/// A complete binary message, after reassembly. May be empty.
#[derive(Clone, PartialEq, Eq, Default, Serialize)]
pub struct BinaryMessage {
    payload: Vec<u8>,
}

impl BinaryMessage {
    pub fn new<B: Into<Vec<u8>>>(payload: B) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl fmt::Debug for BinaryMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryMessage {{ payload: {} bytes }}", self.payload.len())
    }
}
