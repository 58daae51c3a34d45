//! Events exchanged between the application and the websocket reader/writer workers.

use std::fmt;

use serde::Serialize;

mod control;
mod data;
mod failure;
mod handshake;

pub use control::{close_code, Close, Ping, Pong, MAX_CONTROL_PAYLOAD};
pub use data::{BinaryMessage, TextMessage};
pub use failure::{ProtocolViolation, TransportError, ViolationKind};
pub use handshake::ClientHandshake;

pub const OP_TEXT: u8 = 0x1;
pub const OP_BINARY: u8 = 0x2;
pub const OP_CLOSE: u8 = 0x8;
pub const OP_PING: u8 = 0x9;
pub const OP_PONG: u8 = 0xA;

/// One event crossing the worker/application boundary.
///
/// Every field is fixed at construction; consumers `match` on the variant and
/// read the payload through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Opening handshake request, application to writer.
    ClientHandshake(ClientHandshake),
    /// Server accepted the upgrade, reader to application.
    ServerHandshake,
    Text(TextMessage),
    Binary(BinaryMessage),
    Ping(Ping),
    Pong(Pong),
    Close(Close),
    /// The reader found a wire-level protocol violation.
    ProtocolViolation(ProtocolViolation),
    /// A transport failure aborted the reader or the writer.
    Error(TransportError),
}

/// Variant tag without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    ClientHandshake,
    ServerHandshake,
    Text,
    Binary,
    Ping,
    Pong,
    Close,
    ProtocolViolation,
    Error,
}

/// The two queues a message can travel on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Application to writer.
    Outbound,
    /// Reader or writer to the application dispatcher.
    Inbound,
}

impl Message {
    pub fn text<T: Into<String>>(payload: T) -> Self {
        Message::Text(TextMessage::new(payload))
    }

    pub fn binary<B: Into<Vec<u8>>>(payload: B) -> Self {
        Message::Binary(BinaryMessage::new(payload))
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::ClientHandshake(_) => MessageKind::ClientHandshake,
            Message::ServerHandshake => MessageKind::ServerHandshake,
            Message::Text(_) => MessageKind::Text,
            Message::Binary(_) => MessageKind::Binary,
            Message::Ping(_) => MessageKind::Ping,
            Message::Pong(_) => MessageKind::Pong,
            Message::Close(_) => MessageKind::Close,
            Message::ProtocolViolation(_) => MessageKind::ProtocolViolation,
            Message::Error(_) => MessageKind::Error,
        }
    }

    pub fn allows(&self, route: Route) -> bool {
        self.kind().allows(route)
    }

    /// RFC 6455 opcode of the frame this message corresponds to.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            Message::Text(_) => Some(OP_TEXT),
            Message::Binary(_) => Some(OP_BINARY),
            Message::Close(_) => Some(OP_CLOSE),
            Message::Ping(_) => Some(OP_PING),
            Message::Pong(_) => Some(OP_PONG),
            Message::ClientHandshake(_)
            | Message::ServerHandshake
            | Message::ProtocolViolation(_)
            | Message::Error(_) => None,
        }
    }

    pub fn is_control(&self) -> bool {
        matches!(self, Message::Ping(_) | Message::Pong(_) | Message::Close(_))
    }

    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Message::Close(_) | Message::ProtocolViolation(_) | Message::Error(_)
        )
    }
}

impl MessageKind {
    pub fn allows(self, route: Route) -> bool {
        match self {
            MessageKind::ClientHandshake => route == Route::Outbound,
            MessageKind::ServerHandshake | MessageKind::ProtocolViolation | MessageKind::Error => {
                route == Route::Inbound
            }
            MessageKind::Text
            | MessageKind::Binary
            | MessageKind::Ping
            | MessageKind::Pong
            | MessageKind::Close => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::ClientHandshake => "ClientHandshake",
            MessageKind::ServerHandshake => "ServerHandshake",
            MessageKind::Text => "Text",
            MessageKind::Binary => "Binary",
            MessageKind::Ping => "Ping",
            MessageKind::Pong => "Pong",
            MessageKind::Close => "Close",
            MessageKind::ProtocolViolation => "ProtocolViolation",
            MessageKind::Error => "Error",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Outbound => f.write_str("outbound"),
            Route::Inbound => f.write_str("inbound"),
        }
    }
}

impl From<ClientHandshake> for Message {
    fn from(v: ClientHandshake) -> Self {
        Message::ClientHandshake(v)
    }
}

impl From<TextMessage> for Message {
    fn from(v: TextMessage) -> Self {
        Message::Text(v)
    }
}

impl From<BinaryMessage> for Message {
    fn from(v: BinaryMessage) -> Self {
        Message::Binary(v)
    }
}

impl From<Ping> for Message {
    fn from(v: Ping) -> Self {
        Message::Ping(v)
    }
}

impl From<Pong> for Message {
    fn from(v: Pong) -> Self {
        Message::Pong(v)
    }
}

impl From<Close> for Message {
    fn from(v: Close) -> Self {
        Message::Close(v)
    }
}

impl From<ProtocolViolation> for Message {
    fn from(v: ProtocolViolation) -> Self {
        Message::ProtocolViolation(v)
    }
}

impl From<TransportError> for Message {
    fn from(v: TransportError) -> Self {
        Message::Error(v)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn one_of_each() -> Vec<Message> {
        vec![
            ClientHandshake::new("example.com").unwrap().into(),
            Message::ServerHandshake,
            Message::text("hi"),
            Message::binary(vec![1, 2]),
            Ping::new().into(),
            Pong::new().into(),
            Close::new().into(),
            ProtocolViolation::new(3, "control frame too large").into(),
            TransportError::new(io::Error::from(io::ErrorKind::BrokenPipe)).into(),
        ]
    }

    #[test]
    fn routes_follow_direction() {
        let outbound: Vec<_> = one_of_each()
            .iter()
            .filter(|m| m.allows(Route::Outbound))
            .map(Message::kind)
            .collect();
        assert_eq!(
            outbound,
            [
                MessageKind::ClientHandshake,
                MessageKind::Text,
                MessageKind::Binary,
                MessageKind::Ping,
                MessageKind::Pong,
                MessageKind::Close,
            ]
        );

        let inbound: Vec<_> = one_of_each()
            .iter()
            .filter(|m| m.allows(Route::Inbound))
            .map(Message::kind)
            .collect();
        assert_eq!(
            inbound,
            [
                MessageKind::ServerHandshake,
                MessageKind::Text,
                MessageKind::Binary,
                MessageKind::Ping,
                MessageKind::Pong,
                MessageKind::Close,
                MessageKind::ProtocolViolation,
                MessageKind::Error,
            ]
        );
    }

    #[test]
    fn opcodes_match_frames() {
        let opcodes: Vec<_> = one_of_each().iter().map(Message::opcode).collect();
        assert_eq!(
            opcodes,
            [
                None,
                None,
                Some(0x1),
                Some(0x2),
                Some(0x9),
                Some(0xA),
                Some(0x8),
                None,
                None
            ]
        );
    }

    #[test]
    fn control_and_terminal() {
        let all = one_of_each();
        let control: Vec<_> = all.iter().filter(|m| m.is_control()).map(Message::kind).collect();
        assert_eq!(control, [MessageKind::Ping, MessageKind::Pong, MessageKind::Close]);

        let terminal: Vec<_> = all.iter().filter(|m| m.is_terminal()).map(Message::kind).collect();
        assert_eq!(
            terminal,
            [MessageKind::Close, MessageKind::ProtocolViolation, MessageKind::Error]
        );
    }

    #[test]
    fn each_value_has_one_distinct_kind() {
        let all = one_of_each();
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                assert_eq!(i == j, a == b);
                assert_eq!(i == j, a.kind() == b.kind());
            }
        }
    }

    #[test]
    fn empty_binary_is_not_absent() {
        let empty = Message::binary(Vec::new());
        match &empty {
            Message::Binary(b) => assert!(b.payload().is_empty()),
            other => panic!("unexpected {:?}", other),
        }
        assert_ne!(empty, Message::Ping(Ping::new()));
    }

    #[test]
    fn serializes_with_type_tag() {
        let v = serde_json::to_value(Message::ServerHandshake).unwrap();
        assert_eq!(v, serde_json::json!({ "type": "ServerHandshake" }));

        let v = serde_json::to_value(Message::from(Close::with_reason(1000, "bye").unwrap())).unwrap();
        assert_eq!(
            v,
            serde_json::json!({ "type": "Close", "code": 1000, "reason": "bye" })
        );
    }
}
