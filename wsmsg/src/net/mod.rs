#[cfg(feature = "websocket")]
pub mod websocket;
