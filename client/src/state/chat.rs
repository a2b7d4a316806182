//! Chat room context and the render model of the message feed.
//!
//! DESIGN
//! ======
//! Bubbles are built only from `message` events coming back from the broker.
//! Sending never adds a local bubble; the sender sees its own message when the
//! broker echoes it to the room.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use events::{ChatMessage, ServerEvent, attachment_path};

/// Identity of the chat on this page, read once from the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomContext {
    /// Quote the room belongs to.
    pub quote_id: String,
    /// Company the current user acts for.
    pub company_name: String,
}

/// Error raised when the chat container lacks its identity attributes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoomContextError {
    #[error("chat container is missing `{0}`")]
    MissingAttribute(&'static str),
}

impl RoomContext {
    /// Build from the raw `data-quote-id` / `data-company-name` values.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`RoomContextError::MissingAttribute`] naming the first absent attribute.
    pub fn from_attributes(quote_id: Option<String>, company_name: Option<String>) -> Result<Self, RoomContextError> {
        let quote_id = quote_id
            .filter(|v| !v.trim().is_empty())
            .ok_or(RoomContextError::MissingAttribute("data-quote-id"))?;
        let company_name = company_name
            .filter(|v| !v.trim().is_empty())
            .ok_or(RoomContextError::MissingAttribute("data-company-name"))?;
        Ok(Self { quote_id, company_name })
    }
}

/// Which side of the conversation a bubble sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }
}

/// How an attachment is shown inside a bubble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachmentView {
    /// Link wrapping an inline image of the same file.
    Image { href: String },
    /// Plain link labelled with the filename.
    Link { href: String, label: String },
}

impl AttachmentView {
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Image { href } | Self::Link { href, .. } => href,
        }
    }
}

/// One rendered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    /// Client-local key, unique per received event.
    pub key: u64,
    pub direction: Direction,
    pub text: Option<String>,
    pub attachment: Option<AttachmentView>,
    /// `"{sender} - {time}"`.
    pub footer: String,
}

impl Bubble {
    /// Build the bubble for `msg` as seen by `company_name`.
    #[must_use]
    pub fn from_message(key: u64, msg: &ChatMessage, company_name: &str, attachment_base: &str) -> Self {
        let direction = if msg.is_from(company_name) {
            Direction::Sent
        } else {
            Direction::Received
        };
        let attachment = msg.attachment().map(|filename| {
            let href = attachment_path(attachment_base, filename);
            if msg.has_image() {
                AttachmentView::Image { href }
            } else {
                AttachmentView::Link {
                    href,
                    label: filename.to_owned(),
                }
            }
        });
        Self {
            key,
            direction,
            text: msg.text().map(ToOwned::to_owned),
            attachment,
            footer: msg.footer(),
        }
    }

    /// Class list of the bubble element.
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("message-bubble {}", self.direction.css_class())
    }
}

/// State of the chat feed and typing line.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub bubbles: Vec<Bubble>,
    /// Text of the typing indicator; empty when nobody is typing.
    pub typing_indicator: String,
    next_key: u64,
}

impl ChatState {
    /// Apply one broker event. Returns `true` when a bubble was appended.
    pub fn apply(&mut self, event: &ServerEvent, room: &RoomContext, attachment_base: &str) -> bool {
        match event {
            ServerEvent::UserTyping { sender_name } => {
                if sender_name != &room.company_name {
                    self.typing_indicator = typing_label(sender_name);
                }
                false
            }
            ServerEvent::UserStoppedTyping => {
                self.typing_indicator.clear();
                false
            }
            ServerEvent::Message(msg) => {
                self.typing_indicator.clear();
                let key = self.next_key;
                self.next_key += 1;
                self.bubbles
                    .push(Bubble::from_message(key, msg, &room.company_name, attachment_base));
                true
            }
            ServerEvent::NewNotification { .. } | ServerEvent::Other { .. } => false,
        }
    }
}

/// Typing indicator line for a peer.
#[must_use]
pub fn typing_label(sender_name: &str) -> String {
    format!("{sender_name} is typing...")
}

/// Trimmed message text, or `None` when there is nothing to send.
#[must_use]
pub fn outgoing_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
