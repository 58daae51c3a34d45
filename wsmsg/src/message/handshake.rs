use serde::Serialize;

use crate::error::InvalidPayload;

/// Opening handshake request handed to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientHandshake {
    host: String,
    path: String,
    origin: Option<String>,
}

impl ClientHandshake {
    /// Handshake for `/` with no origin.
    pub fn new<H: Into<String>>(host: H) -> Result<Self, InvalidPayload> {
        Self::with_path(host, "/", None)
    }

    pub fn with_path<H, P>(host: H, path: P, origin: Option<String>) -> Result<Self, InvalidPayload>
    where
        H: Into<String>,
        P: Into<String>,
    {
        let host = host.into();
        if host.is_empty() {
            return Err(InvalidPayload::EmptyHost);
        }
        let path = path.into();
        if !path.starts_with('/') {
            return Err(InvalidPayload::RelativePath(path));
        }
        Ok(Self { host, path, origin })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_only() {
        let hs = ClientHandshake::new("example.com").unwrap();
        assert_eq!(hs.host(), "example.com");
        assert_eq!(hs.path(), "/");
        assert_eq!(hs.origin(), None);
    }

    #[test]
    fn full() {
        let hs = ClientHandshake::with_path(
            "example.com",
            "/chat",
            Some("http://example.com".to_string()),
        )
        .unwrap();
        assert_eq!(hs.host(), "example.com");
        assert_eq!(hs.path(), "/chat");
        assert_eq!(hs.origin(), Some("http://example.com"));
    }

    #[test]
    fn empty_origin_is_not_absent() {
        let a = ClientHandshake::with_path("h", "/", Some(String::new())).unwrap();
        let b = ClientHandshake::new("h").unwrap();
        assert_eq!(a.origin(), Some(""));
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(ClientHandshake::new(""), Err(InvalidPayload::EmptyHost));
        assert_eq!(
            ClientHandshake::with_path("example.com", "chat", None),
            Err(InvalidPayload::RelativePath("chat".to_string()))
        );
        assert_eq!(
            ClientHandshake::with_path("example.com", "", None),
            Err(InvalidPayload::RelativePath(String::new()))
        );
    }
}
