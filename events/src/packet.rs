//! Engine.IO v4 and Socket.IO v5 packet framing (text frames only).

#[cfg(test)]
#[path = "packet_test.rs"]
mod packet_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CodecError, DEFAULT_NAMESPACE};

/// Engine.IO `open` payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    /// Engine.IO session identifier.
    pub sid: String,
    /// Transports the server would upgrade to.
    #[serde(default)]
    pub upgrades: Vec<String>,
    /// Interval between server pings, in milliseconds.
    pub ping_interval: u64,
    /// Time the server waits for a pong, in milliseconds.
    pub ping_timeout: u64,
    /// Largest accepted payload in bytes, if advertised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_payload: Option<u64>,
}

/// One Engine.IO packet.
#[derive(Clone, Debug, PartialEq)]
pub enum EnginePacket {
    /// `0`: session handshake.
    Open(Handshake),
    /// `1`: transport close.
    Close,
    /// `2`: heartbeat request with optional payload.
    Ping(String),
    /// `3`: heartbeat reply with optional payload.
    Pong(String),
    /// `4`: a Socket.IO packet.
    Message(String),
    /// `5`: transport upgrade.
    Upgrade,
    /// `6`: noop.
    Noop,
}

impl EnginePacket {
    /// Decode a text frame.
    ///
    /// # Errors
    ///
    /// Fails on empty input, unknown packet types and invalid `open` JSON.
    pub fn decode(text: &str) -> Result<Self, CodecError> {
        let Some(kind) = text.chars().next() else {
            return Err(CodecError::Empty);
        };
        let rest = &text[kind.len_utf8()..];
        match kind {
            '0' => Ok(Self::Open(serde_json::from_str(rest)?)),
            '1' => Ok(Self::Close),
            '2' => Ok(Self::Ping(rest.to_owned())),
            '3' => Ok(Self::Pong(rest.to_owned())),
            '4' => Ok(Self::Message(rest.to_owned())),
            '5' => Ok(Self::Upgrade),
            '6' => Ok(Self::Noop),
            other => Err(CodecError::UnknownEngineType(other)),
        }
    }

    /// Encode into a text frame.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Open(handshake) => {
                // Serializing a plain struct into a String cannot fail.
                format!("0{}", serde_json::to_string(handshake).unwrap_or_default())
            }
            Self::Close => "1".to_owned(),
            Self::Ping(payload) => format!("2{payload}"),
            Self::Pong(payload) => format!("3{payload}"),
            Self::Message(payload) => format!("4{payload}"),
            Self::Upgrade => "5".to_owned(),
            Self::Noop => "6".to_owned(),
        }
    }
}

/// One Socket.IO packet, as carried inside [`EnginePacket::Message`].
#[derive(Clone, Debug, PartialEq)]
pub enum SocketPacket {
    /// `0`: namespace connect (client request or server acceptance).
    Connect { namespace: String, data: Option<Value> },
    /// `1`: namespace disconnect.
    Disconnect { namespace: String },
    /// `2`: named event with positional arguments.
    Event {
        namespace: String,
        ack_id: Option<u64>,
        name: String,
        args: Vec<Value>,
    },
    /// `3`: acknowledgement of an earlier event.
    Ack {
        namespace: String,
        ack_id: u64,
        args: Vec<Value>,
    },
    /// `4`: namespace connection refused.
    ConnectError { namespace: String, data: Option<Value> },
}

impl SocketPacket {
    /// Namespace the packet belongs to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Connect { namespace, .. }
            | Self::Disconnect { namespace }
            | Self::Event { namespace, .. }
            | Self::Ack { namespace, .. }
            | Self::ConnectError { namespace, .. } => namespace,
        }
    }

    /// Build an event on the default namespace.
    #[must_use]
    pub fn event(name: &str, payload: Value) -> Self {
        Self::Event {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            ack_id: None,
            name: name.to_owned(),
            args: vec![payload],
        }
    }

    /// Decode the payload of an Engine.IO message.
    ///
    /// Layout: `<type>[<attachments>-][<namespace>,][<ack id>][<json>]`.
    ///
    /// # Errors
    ///
    /// Fails on empty input, unknown or binary packet types, bad JSON and
    /// events whose first argument is not a string name.
    pub fn decode(payload: &str) -> Result<Self, CodecError> {
        let Some(kind) = payload.chars().next() else {
            return Err(CodecError::Empty);
        };
        if matches!(kind, '5' | '6') {
            return Err(CodecError::BinaryUnsupported);
        }
        let mut rest = &payload[kind.len_utf8()..];

        let namespace = if rest.starts_with('/') {
            let (namespace, tail) = match rest.find(',') {
                Some(idx) => (&rest[..idx], &rest[idx + 1..]),
                None => (rest, ""),
            };
            rest = tail;
            namespace.to_owned()
        } else {
            DEFAULT_NAMESPACE.to_owned()
        };

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        let ack_id = if digits > 0 {
            Some(
                rest[..digits]
                    .parse::<u64>()
                    .map_err(|_| CodecError::Malformed("ack id out of range"))?,
            )
        } else {
            None
        };
        rest = &rest[digits..];

        let data = if rest.is_empty() {
            None
        } else {
            Some(serde_json::from_str::<Value>(rest)?)
        };

        match kind {
            '0' => Ok(Self::Connect { namespace, data }),
            '1' => Ok(Self::Disconnect { namespace }),
            '2' => {
                let Some(Value::Array(mut args)) = data else {
                    return Err(CodecError::Malformed("event payload must be an array"));
                };
                if args.is_empty() {
                    return Err(CodecError::Malformed("event without a name"));
                }
                let Value::String(name) = args.remove(0) else {
                    return Err(CodecError::Malformed("event name must be a string"));
                };
                Ok(Self::Event {
                    namespace,
                    ack_id,
                    name,
                    args,
                })
            }
            '3' => {
                let ack_id = ack_id.ok_or(CodecError::Malformed("ack without an id"))?;
                let args = match data {
                    Some(Value::Array(args)) => args,
                    None => Vec::new(),
                    Some(_) => return Err(CodecError::Malformed("ack payload must be an array")),
                };
                Ok(Self::Ack {
                    namespace,
                    ack_id,
                    args,
                })
            }
            '4' => Ok(Self::ConnectError { namespace, data }),
            other => Err(CodecError::UnknownSocketType(other)),
        }
    }

    /// Encode into an Engine.IO message payload (without the leading `4`).
    #[must_use]
    pub fn encode(&self) -> String {
        let (kind, ack_id, data) = match self {
            Self::Connect { data, .. } => ('0', None, data.clone()),
            Self::Disconnect { .. } => ('1', None, None),
            Self::Event { ack_id, name, args, .. } => {
                let mut items = Vec::with_capacity(args.len() + 1);
                items.push(Value::String(name.clone()));
                items.extend(args.iter().cloned());
                ('2', *ack_id, Some(Value::Array(items)))
            }
            Self::Ack { ack_id, args, .. } => ('3', Some(*ack_id), Some(Value::Array(args.clone()))),
            Self::ConnectError { data, .. } => ('4', None, data.clone()),
        };

        let mut out = String::new();
        out.push(kind);
        let namespace = self.namespace();
        if namespace != DEFAULT_NAMESPACE {
            out.push_str(namespace);
            out.push(',');
        }
        if let Some(id) = ack_id {
            out.push_str(&id.to_string());
        }
        if let Some(data) = data {
            out.push_str(&data.to_string());
        }
        out
    }

    /// Encode as a complete Engine.IO text frame.
    #[must_use]
    pub fn to_frame(&self) -> String {
        EnginePacket::Message(self.encode()).encode()
    }
}
