use std::str::Utf8Error;

use crate::message::{Message, MessageKind, Route};

/// A message could not be constructed without breaking one of its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPayload {
    #[error("handshake host is empty")]
    EmptyHost,

    #[error("handshake path must start with '/': {0:?}")]
    RelativePath(String),

    #[error("text payload is not valid utf-8: {0}")]
    InvalidUtf8(#[from] Utf8Error),

    #[error("control frame payload is {len} bytes, at most 125 allowed")]
    ControlPayloadTooLarge { len: usize },

    #[error("close code {0} is outside 0..=65535")]
    CloseCodeOutOfRange(i64),

    #[error("close reason given without a status code")]
    ReasonWithoutCode,

    #[error("raw frames carry no complete message")]
    RawFrame,
}

/// A queue refused a message. The message is handed back untouched.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("{kind} cannot travel {route}")]
    Misrouted {
        kind: MessageKind,
        route: Route,
        message: Message,
    },

    #[error("{route} queue is full")]
    Full { route: Route, message: Message },

    #[error("{route} queue is closed")]
    Closed { route: Route, message: Message },
}

impl SendError {
    pub fn into_message(self) -> Message {
        match self {
            SendError::Misrouted { message, .. }
            | SendError::Full { message, .. }
            | SendError::Closed { message, .. } => message,
        }
    }
}

/// Owned snapshot of an error and its `source()` chain.
#[derive(Clone, PartialEq, Eq, serde::Serialize)]
pub struct ErrorReport {
    description: String,
    source: Option<Box<ErrorReport>>,
}

impl ErrorReport {
    pub fn new<T>(e: &T) -> ErrorReport
    where
        T: ?Sized + std::error::Error,
    {
        ErrorReport {
            description: e.to_string(),
            source: e.source().map(|s| Box::new(ErrorReport::new(s))),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn chain(&self) -> impl Iterator<Item = &ErrorReport> {
        std::iter::successors(Some(self), |r| r.source.as_deref())
    }
}

impl std::error::Error for ErrorReport {
    fn source(&self) -> Option<&(dyn 'static + std::error::Error)> {
        self.source
            .as_ref()
            .map(|s| &**s as &(dyn 'static + std::error::Error))
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description)
    }
}

impl std::fmt::Debug for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.chain().map(|r| &r.description))
            .finish()
    }
}
