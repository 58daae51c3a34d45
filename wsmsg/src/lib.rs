pub mod channel;
pub mod error;
pub mod message;
pub mod net;
pub mod render;

pub use log;
pub use serde;

pub mod sync {
    pub use tokio::sync::mpsc;
}

pub use error::{ErrorReport, InvalidPayload, SendError};
pub use message::{
    BinaryMessage, ClientHandshake, Close, Message, MessageKind, Ping, Pong, ProtocolViolation,
    Route, TextMessage, TransportError, ViolationKind,
};
pub use render::RenderOptions;
