//! Outgoing side of one chat room: join, typing relay and message send.
//!
//! The widget calls into [`ChatRoom`] from its DOM handlers; every decision
//! about which events to emit lives here so it can be checked against the
//! queued frames in tests.

#[cfg(test)]
#[path = "chat_room_test.rs"]
mod chat_room_test;

use super::socket_client::EventSender;
use super::types::ClientEvent;
use crate::state::chat::{RoomContext, outgoing_text};
use crate::state::typing::TypingDebounce;

#[derive(Clone, Debug)]
pub struct ChatRoom {
    room: RoomContext,
    sender: EventSender,
    typing: TypingDebounce,
}

impl ChatRoom {
    #[must_use]
    pub fn new(room: RoomContext, sender: EventSender) -> Self {
        Self {
            room,
            sender,
            typing: TypingDebounce::default(),
        }
    }

    #[must_use]
    pub fn room(&self) -> &RoomContext {
        &self.room
    }

    fn quote_id(&self) -> String {
        self.room.quote_id.clone()
    }

    /// Enter the room. Sent on every namespace connect.
    pub fn join(&self) -> bool {
        self.sender.emit(&ClientEvent::Join {
            quote_id: self.quote_id(),
        })
    }

    /// The input changed: emit `typing` and return the generation the
    /// stop timer must carry.
    pub fn keystroke(&mut self) -> u64 {
        self.sender.emit(&ClientEvent::Typing {
            quote_id: self.quote_id(),
        });
        self.typing.keystroke()
    }

    /// The stop timer for `generation` elapsed. Emits `stop_typing` only for
    /// the live timer.
    pub fn typing_expired(&mut self, generation: u64) -> bool {
        if !self.typing.expire(generation) {
            return false;
        }
        self.sender.emit(&ClientEvent::StopTyping {
            quote_id: self.quote_id(),
        })
    }

    /// Submit the text input. Returns `true` if a message was emitted and
    /// the input should be cleared.
    pub fn send_text(&mut self, input: &str) -> bool {
        let Some(text) = outgoing_text(input) else {
            return false;
        };
        self.send(Some(text), None)
    }

    /// Post a message referencing an uploaded file.
    pub fn send_attachment(&mut self, filename: String) -> bool {
        if filename.is_empty() {
            return false;
        }
        self.send(None, Some(filename))
    }

    fn send(&mut self, message: Option<String>, attachment: Option<String>) -> bool {
        if message.is_none() && attachment.is_none() {
            return false;
        }
        self.typing.cancel();
        self.sender.emit(&ClientEvent::StopTyping {
            quote_id: self.quote_id(),
        });
        self.sender.emit(&ClientEvent::SendMessage {
            quote_id: self.quote_id(),
            message,
            attachment,
        })
    }

    /// Disarm the stop timer on unmount.
    pub fn teardown(&mut self) {
        self.typing.cancel();
    }
}
