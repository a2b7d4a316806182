//! Typed realtime events exchanged with the chat broker.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde_json::Value;

use crate::message::ChatMessage;
use crate::packet::SocketPacket;
use crate::CodecError;

/// Events the client emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// Enter the room of a quote. Safe to repeat after every reconnect.
    Join { quote_id: String },
    /// The local user is typing.
    Typing { quote_id: String },
    /// The local user went quiet.
    StopTyping { quote_id: String },
    /// Post a text message, an attachment reference, or both.
    SendMessage {
        quote_id: String,
        message: Option<String>,
        attachment: Option<String>,
    },
}

impl ClientEvent {
    /// Socket.IO event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Typing { .. } => "typing",
            Self::StopTyping { .. } => "stop_typing",
            Self::SendMessage { .. } => "send_message",
        }
    }

    /// Room the event is scoped to.
    #[must_use]
    pub fn quote_id(&self) -> &str {
        match self {
            Self::Join { quote_id }
            | Self::Typing { quote_id }
            | Self::StopTyping { quote_id }
            | Self::SendMessage { quote_id, .. } => quote_id,
        }
    }

    /// JSON payload sent as the single event argument.
    #[must_use]
    pub fn payload(&self) -> Value {
        match self {
            Self::Join { quote_id } | Self::Typing { quote_id } | Self::StopTyping { quote_id } => {
                serde_json::json!({ "quote_id": quote_id })
            }
            Self::SendMessage {
                quote_id,
                message,
                attachment,
            } => serde_json::json!({
                "quote_id": quote_id,
                "message": message,
                "attachment": attachment,
            }),
        }
    }

    /// Wrap into a Socket.IO packet on the default namespace.
    #[must_use]
    pub fn to_packet(&self) -> SocketPacket {
        SocketPacket::event(self.name(), self.payload())
    }

    /// Encode as a complete text frame, e.g. `42["join",{"quote_id":"7"}]`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_packet().to_frame()
    }
}

/// Events the broker pushes to clients.
#[derive(Clone, Debug, PartialEq)]
pub enum ServerEvent {
    /// A room member started typing.
    UserTyping { sender_name: String },
    /// A room member stopped typing.
    UserStoppedTyping,
    /// A message was posted to the room.
    Message(ChatMessage),
    /// The unread notification count changed.
    NewNotification { unread_count: u64 },
    /// An event this client does not handle.
    Other { name: String },
}

impl ServerEvent {
    /// Interpret a decoded Socket.IO event.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Malformed`] or [`CodecError::Json`] when a known
    /// event carries a payload of the wrong shape.
    pub fn from_event(name: &str, args: &[Value]) -> Result<Self, CodecError> {
        let payload = args.first().unwrap_or(&Value::Null);
        match name {
            "user_typing" => {
                let sender_name = payload
                    .get("sender_name")
                    .and_then(Value::as_str)
                    .ok_or(CodecError::Malformed("user_typing without sender_name"))?;
                Ok(Self::UserTyping {
                    sender_name: sender_name.to_owned(),
                })
            }
            "user_stopped_typing" => Ok(Self::UserStoppedTyping),
            "message" => Ok(Self::Message(serde_json::from_value(payload.clone())?)),
            "new_notification" => {
                let unread_count = payload
                    .get("unread_count")
                    .and_then(count_from_value)
                    .ok_or(CodecError::Malformed("new_notification without unread_count"))?;
                Ok(Self::NewNotification { unread_count })
            }
            other => Ok(Self::Other { name: other.to_owned() }),
        }
    }

    /// Socket.IO event name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::UserTyping { .. } => "user_typing",
            Self::UserStoppedTyping => "user_stopped_typing",
            Self::Message(_) => "message",
            Self::NewNotification { .. } => "new_notification",
            Self::Other { name } => name,
        }
    }
}

fn count_from_value(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<u64>().ok()))
}
