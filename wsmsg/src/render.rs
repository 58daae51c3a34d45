//! Log-friendly rendering of messages.
//!
//! Binary payloads (binary messages, ping and pong bodies) are shown as a
//! byte count. Strings are shown up to [`RenderOptions::max_text_len`]
//! characters, followed by `...` when cut.

use std::fmt;

use crate::message::{Message, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_text_len: usize,
}

impl RenderOptions {
    pub const DEFAULT_MAX_TEXT_LEN: usize = 64;

    pub fn new(max_text_len: usize) -> Self {
        Self { max_text_len }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TEXT_LEN)
    }
}

/// Borrowed message plus the options to render it with.
pub struct Rendered<'a> {
    message: &'a Message,
    options: RenderOptions,
}

impl Message {
    pub fn render(&self, options: RenderOptions) -> Rendered<'_> {
        Rendered {
            message: self,
            options,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.render(RenderOptions::default()), f)
    }
}

struct Truncated<'a>(&'a str, usize);

impl fmt::Display for Truncated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, max) = (self.0, self.1);
        match s.char_indices().nth(max) {
            Some((end, _)) => write!(f, "{:?}...", &s[..end]),
            None => write!(f, "{:?}", s),
        }
    }
}

struct Bytes<'a>(Option<&'a [u8]>);

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(b) => write!(f, "{} bytes", b.len()),
            None => f.write_str("none"),
        }
    }
}

fn cause(e: &TransportError, max: usize) -> String {
    Truncated(&e.to_string(), max).to_string()
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.options.max_text_len;
        match self.message {
            Message::ClientHandshake(hs) => {
                write!(
                    f,
                    "ClientHandshake {{ host: {:?}, path: {:?}",
                    hs.host(),
                    hs.path()
                )?;
                match hs.origin() {
                    Some(origin) => write!(f, ", origin: {:?} }}", origin),
                    None => f.write_str(", origin: none }"),
                }
            }
            Message::ServerHandshake => f.write_str("ServerHandshake"),
            Message::Text(t) => write!(
                f,
                "Text({} bytes: {})",
                t.payload().len(),
                Truncated(t.payload(), max)
            ),
            Message::Binary(b) => write!(f, "Binary({})", Bytes(Some(b.payload()))),
            Message::Ping(p) => write!(f, "Ping({})", Bytes(p.payload())),
            Message::Pong(p) => write!(f, "Pong({})", Bytes(p.payload())),
            Message::Close(c) => match (c.status(), c.reason()) {
                (None, _) => f.write_str("Close(no status)"),
                (Some(code), None) => write!(f, "Close({})", code),
                (Some(code), Some(reason)) => {
                    write!(f, "Close({}, {})", code, Truncated(reason, max))
                }
            },
            Message::ProtocolViolation(v) => write!(
                f,
                "ProtocolViolation({}, {})",
                v.code(),
                Truncated(v.reason(), max)
            ),
            Message::Error(e) => write!(f, "Error({})", cause(e, max)),
        }
    }
}
