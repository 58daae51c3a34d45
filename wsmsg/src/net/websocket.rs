//! Conversions between [`Message`] and tungstenite's frame-level message type.
//!
//! Tungstenite cannot tell an empty control payload from a missing one, so
//! empty ping/pong bodies and empty close reasons read back as absent.

use std::borrow::Cow;

use tokio_tungstenite::tungstenite::{self, protocol::CloseFrame};

use crate::{
    error::InvalidPayload,
    message::{BinaryMessage, Close, Message, Ping, Pong, TextMessage, TransportError},
};

pub use tokio_tungstenite::tungstenite::Message as WsMessage;

fn control(payload: Vec<u8>) -> Option<Vec<u8>> {
    Some(payload).filter(|p| !p.is_empty())
}

impl TryFrom<WsMessage> for Message {
    type Error = InvalidPayload;

    fn try_from(v: WsMessage) -> Result<Self, InvalidPayload> {
        #[allow(unreachable_patterns)]
        let message = match v {
            WsMessage::Text(v) => Message::Text(TextMessage::new(v)),
            WsMessage::Binary(v) => Message::Binary(BinaryMessage::new(v)),
            WsMessage::Ping(v) => Message::Ping(match control(v) {
                Some(v) => Ping::with_payload(v)?,
                None => Ping::new(),
            }),
            WsMessage::Pong(v) => Message::Pong(match control(v) {
                Some(v) => Pong::with_payload(v)?,
                None => Pong::new(),
            }),
            WsMessage::Close(None) => Message::Close(Close::new()),
            WsMessage::Close(Some(CloseFrame { code, reason })) => {
                let code = i64::from(u16::from(code));
                let reason = Some(reason.into_owned()).filter(|r| !r.is_empty());
                Message::Close(Close::from_raw(code, reason)?)
            }
            _ => return Err(InvalidPayload::RawFrame),
        };
        Ok(message)
    }
}

/// Frame variants convert; handshake and failure events are handed back.
impl TryFrom<Message> for WsMessage {
    type Error = Message;

    fn try_from(v: Message) -> Result<Self, Self::Error> {
        match v {
            Message::Text(v) => Ok(WsMessage::Text(v.into_payload())),
            Message::Binary(v) => Ok(WsMessage::Binary(v.into_payload())),
            Message::Ping(v) => Ok(WsMessage::Ping(v.into_payload().unwrap_or_default())),
            Message::Pong(v) => Ok(WsMessage::Pong(v.into_payload().unwrap_or_default())),
            Message::Close(v) => {
                let (code, reason) = v.into_parts();
                Ok(WsMessage::Close(code.map(|code| CloseFrame {
                    code: code.into(),
                    reason: Cow::Owned(reason.unwrap_or_default()),
                })))
            }
            other @ (Message::ClientHandshake(_)
            | Message::ServerHandshake
            | Message::ProtocolViolation(_)
            | Message::Error(_)) => Err(other),
        }
    }
}

impl From<tungstenite::Error> for TransportError {
    fn from(e: tungstenite::Error) -> Self {
        TransportError::new(e)
    }
}
