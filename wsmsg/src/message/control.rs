use std::fmt;

use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::error::InvalidPayload;

/// Largest payload a control frame may carry.
pub const MAX_CONTROL_PAYLOAD: usize = 125;

/// Status codes from the websocket close-code registry.
pub mod close_code {
    pub const NORMAL: u16 = 1000;
    pub const GOING_AWAY: u16 = 1001;
    pub const PROTOCOL_ERROR: u16 = 1002;
    pub const UNSUPPORTED_DATA: u16 = 1003;
    /// Reserved, never sent on the wire. Reported when a close frame had no body.
    pub const NO_STATUS_RECEIVED: u16 = 1005;
    /// Reserved, never sent on the wire.
    pub const ABNORMAL_CLOSURE: u16 = 1006;
    pub const INVALID_PAYLOAD: u16 = 1007;
    pub const POLICY_VIOLATION: u16 = 1008;
    pub const MESSAGE_TOO_BIG: u16 = 1009;
    pub const MANDATORY_EXTENSION: u16 = 1010;
    pub const INTERNAL_ERROR: u16 = 1011;
}

fn control_payload(payload: Vec<u8>) -> Result<Vec<u8>, InvalidPayload> {
    if payload.len() > MAX_CONTROL_PAYLOAD {
        return Err(InvalidPayload::ControlPayloadTooLarge { len: payload.len() });
    }
    Ok(payload)
}

struct PayloadLen<'a>(&'a Option<Vec<u8>>);

impl fmt::Debug for PayloadLen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "Some({} bytes)", p.len()),
            None => f.write_str("None"),
        }
    }
}

macro_rules! control_frame {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Default, Serialize)]
        pub struct $name {
            payload: Option<Vec<u8>>,
        }

        impl $name {
            pub fn new() -> Self {
                Self { payload: None }
            }

            /// Fails with `ControlPayloadTooLarge` above 125 bytes.
            pub fn with_payload<B: Into<Vec<u8>>>(payload: B) -> Result<Self, InvalidPayload> {
                Ok(Self {
                    payload: Some(control_payload(payload.into())?),
                })
            }

            pub fn payload(&self) -> Option<&[u8]> {
                self.payload.as_deref()
            }

            pub fn into_payload(self) -> Option<Vec<u8>> {
                self.payload
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("payload", &PayloadLen(&self.payload))
                    .finish()
            }
        }
    };
}

control_frame!(
    /// Ping control frame, sent or received.
    Ping
);

control_frame!(
    /// Pong control frame, sent or received.
    Pong
);

/// Close control frame, sent or received.
///
/// A close without a status code reports `code() == -1` and never has a reason.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Close {
    code: Option<u16>,
    reason: Option<String>,
}

impl Close {
    pub const NO_STATUS: i32 = -1;

    pub fn new() -> Self {
        Self {
            code: None,
            reason: None,
        }
    }

    pub fn with_code(code: i32) -> Result<Self, InvalidPayload> {
        Ok(Self {
            code: Some(status(code.into())?),
            reason: None,
        })
    }

    pub fn with_reason<R: Into<String>>(code: i32, reason: R) -> Result<Self, InvalidPayload> {
        Ok(Self {
            code: Some(status(code.into())?),
            reason: Some(reason.into()),
        })
    }

    /// Builds a close from a decoded `(code, reason)` pair where `-1` means
    /// no status. An empty reason without a status collapses to no reason.
    pub fn from_raw(code: i64, reason: Option<String>) -> Result<Self, InvalidPayload> {
        if code == i64::from(Self::NO_STATUS) {
            return match reason {
                Some(r) if !r.is_empty() => Err(InvalidPayload::ReasonWithoutCode),
                _ => Ok(Self::new()),
            };
        }
        Ok(Self {
            code: Some(status(code)?),
            reason,
        })
    }

    /// The status code, or `-1` when none was given.
    pub fn code(&self) -> i32 {
        self.code.map_or(Self::NO_STATUS, i32::from)
    }

    pub fn status(&self) -> Option<u16> {
        self.code
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn into_parts(self) -> (Option<u16>, Option<String>) {
        (self.code, self.reason)
    }
}

fn status(code: i64) -> Result<u16, InvalidPayload> {
    u16::try_from(code).map_err(|_| InvalidPayload::CloseCodeOutOfRange(code))
}

impl Serialize for Close {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Close", 2)?;
        s.serialize_field("code", &self.code())?;
        s.serialize_field("reason", &self.reason)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_payload_limit() {
        let ping = Ping::with_payload(vec![0u8; 125]).unwrap();
        assert_eq!(ping.payload().map(<[u8]>::len), Some(125));

        assert_eq!(
            Ping::with_payload(vec![0u8; 126]),
            Err(InvalidPayload::ControlPayloadTooLarge { len: 126 })
        );
        assert_eq!(
            Pong::with_payload(vec![0u8; 126]),
            Err(InvalidPayload::ControlPayloadTooLarge { len: 126 })
        );
    }

    #[test]
    fn absent_and_empty_payloads_differ() {
        assert_eq!(Ping::new().payload(), None);
        assert_eq!(Ping::with_payload(Vec::new()).unwrap().payload(), Some(&[][..]));
        assert_ne!(Ping::new(), Ping::with_payload(Vec::new()).unwrap());
    }

    #[test]
    fn payload_is_moved_not_copied() {
        let buf = vec![7u8; 16];
        let ptr = buf.as_ptr();
        let pong = Pong::with_payload(buf).unwrap();
        assert_eq!(pong.into_payload().unwrap().as_ptr(), ptr);
    }

    #[test]
    fn debug_hides_payload_bytes() {
        let ping = Ping::with_payload(vec![0xAB; 4]).unwrap();
        assert_eq!(format!("{:?}", ping), "Ping { payload: Some(4 bytes) }");
        assert_eq!(format!("{:?}", Pong::new()), "Pong { payload: None }");
    }

    #[test]
    fn close_code_range() {
        assert_eq!(Close::with_code(0).unwrap().code(), 0);
        assert_eq!(Close::with_code(65535).unwrap().code(), 65535);
        assert_eq!(
            Close::with_code(-2),
            Err(InvalidPayload::CloseCodeOutOfRange(-2))
        );
        assert_eq!(
            Close::with_code(65536),
            Err(InvalidPayload::CloseCodeOutOfRange(65536))
        );
        assert_eq!(
            Close::with_code(-1),
            Err(InvalidPayload::CloseCodeOutOfRange(-1))
        );
    }

    #[test]
    fn empty_close_differs_from_normal_close() {
        let empty = Close::new();
        assert_eq!(empty.code(), -1);
        assert_eq!(empty.status(), None);
        assert_eq!(empty.reason(), None);

        let normal = Close::with_code(close_code::NORMAL.into()).unwrap();
        assert_eq!(normal.reason(), None);
        assert_ne!(empty, normal);
    }

    #[test]
    fn close_with_reason() {
        let close = Close::with_reason(1000, "bye").unwrap();
        assert_eq!(close.code(), 1000);
        assert_eq!(close.reason(), Some("bye"));
        assert_eq!(close.into_parts(), (Some(1000), Some("bye".to_string())));
    }

    #[test]
    fn close_from_raw() {
        assert_eq!(Close::from_raw(-1, None), Ok(Close::new()));
        assert_eq!(Close::from_raw(-1, Some(String::new())), Ok(Close::new()));
        assert_eq!(
            Close::from_raw(-1, Some("late".into())),
            Err(InvalidPayload::ReasonWithoutCode)
        );
        assert_eq!(
            Close::from_raw(1001, Some("away".into())),
            Close::with_reason(1001, "away")
        );
        assert_eq!(
            Close::from_raw(70000, None),
            Err(InvalidPayload::CloseCodeOutOfRange(70000))
        );
    }
}
