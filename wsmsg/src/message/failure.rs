use std::{fmt, io, sync::Arc};

use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::error::ErrorReport;

/// Wire-level violations the reader reports. The discriminant is the code
/// carried by [`ProtocolViolation`]; it is not a websocket close code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ViolationKind {
    ReservedBits = 1,
    InvalidOpcode = 2,
    ControlFrameTooLarge = 3,
    FragmentedControlFrame = 4,
    MaskedServerFrame = 5,
    InvalidUtf8 = 6,
    InvalidCloseCode = 7,
    UnexpectedContinuation = 8,
    IncompleteFragment = 9,
}

impl ViolationKind {
    const ALL: [ViolationKind; 9] = [
        ViolationKind::ReservedBits,
        ViolationKind::InvalidOpcode,
        ViolationKind::ControlFrameTooLarge,
        ViolationKind::FragmentedControlFrame,
        ViolationKind::MaskedServerFrame,
        ViolationKind::InvalidUtf8,
        ViolationKind::InvalidCloseCode,
        ViolationKind::UnexpectedContinuation,
        ViolationKind::IncompleteFragment,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.code() == code)
    }

    pub fn description(self) -> &'static str {
        match self {
            ViolationKind::ReservedBits => "reserved bits set",
            ViolationKind::InvalidOpcode => "invalid opcode",
            ViolationKind::ControlFrameTooLarge => "control frame too large",
            ViolationKind::FragmentedControlFrame => "fragmented control frame",
            ViolationKind::MaskedServerFrame => "masked frame from server",
            ViolationKind::InvalidUtf8 => "invalid utf-8 in text message",
            ViolationKind::InvalidCloseCode => "invalid close code",
            ViolationKind::UnexpectedContinuation => "continuation without a started message",
            ViolationKind::IncompleteFragment => "new message before the previous one finished",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtocolViolation {
    code: i32,
    reason: String,
}

impl ProtocolViolation {
    pub fn new<R: Into<String>>(code: i32, reason: R) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Violation of a known kind, using its description as the reason.
    pub fn from_kind(kind: ViolationKind) -> Self {
        Self::new(kind.code(), kind.description())
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn kind(&self) -> Option<ViolationKind> {
        ViolationKind::from_code(self.code)
    }
}

/// Opaque transport failure that stopped a worker.
///
/// Two values are equal only if they share the same underlying cause, so a
/// clone equals its original while two separately built errors never do.
#[derive(Debug, Clone)]
pub struct TransportError {
    cause: Arc<dyn std::error::Error + Send + Sync + 'static>,
}

impl TransportError {
    pub fn new<E>(cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            cause: Arc::new(cause),
        }
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.cause
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::new(self.cause())
    }
}

impl PartialEq for TransportError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cause, &other.cause)
    }
}

impl Eq for TransportError {}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn 'static + std::error::Error)> {
        Some(&*self.cause)
    }
}

impl From<io::Error> for TransportError {
    fn from(e: io::Error) -> Self {
        TransportError::new(e)
    }
}

impl Serialize for TransportError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TransportError", 1)?;
        s.serialize_field("cause", &self.report())?;
        s.end()
    }
}
