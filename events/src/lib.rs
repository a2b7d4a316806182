//! Shared realtime event model and Socket.IO text codec.
//!
//! This crate owns the wire representation used by both the browser widgets
//! (`client`) and the operator CLI (`cli`). The broker speaks Socket.IO v5 on
//! top of Engine.IO v4; only the WebSocket transport with text frames is
//! supported, which is all the chat, notification and typing events need.
//!
//! LAYERS
//! ======
//! - [`packet`]: Engine.IO and Socket.IO packet framing.
//! - [`event`]: typed client/server events carried inside Socket.IO events.
//! - [`message`]: chat payload DTOs and small display helpers.
//! - [`classify`]: one-call decoding of a raw text frame into what a session
//!   loop needs to act on.

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

pub mod event;
pub mod message;
pub mod packet;

pub use event::{ClientEvent, ServerEvent};
pub use message::{ChatMessage, UploadResponse, attachment_path, display_time};
pub use packet::{EnginePacket, Handshake, SocketPacket};

use serde_json::Value;

/// Default Socket.IO namespace.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Default HTTP path the Socket.IO server is mounted on.
pub const DEFAULT_SOCKET_PATH: &str = "/socket.io/";

/// Error returned when encoding or decoding realtime packets.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The frame carried no bytes at all.
    #[error("empty packet")]
    Empty,
    /// The first character is not a known Engine.IO packet type.
    #[error("unknown engine.io packet type `{0}`")]
    UnknownEngineType(char),
    /// The first character of a message payload is not a known Socket.IO packet type.
    #[error("unknown socket.io packet type `{0}`")]
    UnknownSocketType(char),
    /// Binary events need a second frame for attachments; the widgets never use them.
    #[error("binary socket.io packets are not supported")]
    BinaryUnsupported,
    /// The packet was structurally invalid.
    #[error("malformed packet: {0}")]
    Malformed(&'static str),
    /// The JSON part of a packet could not be parsed.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The base URL did not use an `http` or `https` scheme.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// What a session loop has to do with one inbound text frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Inbound {
    /// Engine.IO handshake; the client must answer with [`connect_frame`].
    Open(Handshake),
    /// Heartbeat; the client must answer with [`pong_frame`].
    Ping(String),
    /// The default namespace accepted the connection (the `connect` event).
    Connected,
    /// The server refused the namespace connection.
    ConnectRefused(Option<Value>),
    /// The server disconnected the namespace.
    Disconnected,
    /// The Engine.IO session is closing.
    Closed,
    /// An application event.
    Event(ServerEvent),
    /// Anything the widgets have no use for (acks, other namespaces, noop).
    Ignored,
}

/// Decode a raw WebSocket text frame.
///
/// # Errors
///
/// Returns a [`CodecError`] when either packet layer is malformed or a known
/// event carries an unusable payload.
pub fn classify(text: &str) -> Result<Inbound, CodecError> {
    match EnginePacket::decode(text)? {
        EnginePacket::Open(handshake) => Ok(Inbound::Open(handshake)),
        EnginePacket::Ping(payload) => Ok(Inbound::Ping(payload)),
        EnginePacket::Close => Ok(Inbound::Closed),
        EnginePacket::Pong(_) | EnginePacket::Upgrade | EnginePacket::Noop => Ok(Inbound::Ignored),
        EnginePacket::Message(payload) => classify_socket(&SocketPacket::decode(&payload)?),
    }
}

fn classify_socket(packet: &SocketPacket) -> Result<Inbound, CodecError> {
    if packet.namespace() != DEFAULT_NAMESPACE {
        return Ok(Inbound::Ignored);
    }
    match packet {
        SocketPacket::Connect { .. } => Ok(Inbound::Connected),
        SocketPacket::ConnectError { data, .. } => Ok(Inbound::ConnectRefused(data.clone())),
        SocketPacket::Disconnect { .. } => Ok(Inbound::Disconnected),
        SocketPacket::Event { name, args, .. } => Ok(Inbound::Event(ServerEvent::from_event(name, args)?)),
        SocketPacket::Ack { .. } => Ok(Inbound::Ignored),
    }
}

/// Text frame that connects the default namespace (`40`).
#[must_use]
pub fn connect_frame() -> String {
    EnginePacket::Message(
        SocketPacket::Connect {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            data: None,
        }
        .encode(),
    )
    .encode()
}

/// Heartbeat reply echoing the ping payload (`3`).
#[must_use]
pub fn pong_frame(payload: &str) -> String {
    EnginePacket::Pong(payload.to_owned()).encode()
}

/// Build the WebSocket endpoint for an HTTP base URL.
///
/// `http://host:5000` with the default path becomes
/// `ws://host:5000/socket.io/?EIO=4&transport=websocket`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidBaseUrl`] unless the base uses `http` or `https`.
pub fn websocket_url(base_url: &str, socket_path: &str) -> Result<String, CodecError> {
    let base = base_url.trim_end_matches('/');
    let (scheme, rest) = if let Some(rest) = base.strip_prefix("http://") {
        ("ws", rest)
    } else if let Some(rest) = base.strip_prefix("https://") {
        ("wss", rest)
    } else {
        return Err(CodecError::InvalidBaseUrl(base_url.to_owned()));
    };
    if rest.is_empty() {
        return Err(CodecError::InvalidBaseUrl(base_url.to_owned()));
    }

    let path = socket_path.trim_matches('/');
    let path = if path.is_empty() { String::new() } else { format!("/{path}") };
    Ok(format!("{scheme}://{rest}{path}/?EIO=4&transport=websocket"))
}
