//! Chat payloads and HTTP upload responses.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// A chat message as relayed by the broker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name of the sending company.
    pub sender_name: String,
    /// Text body, if any.
    #[serde(default)]
    pub message: Option<String>,
    /// Stored attachment name under the chat upload folder, if any.
    #[serde(default)]
    pub attachment_filename: Option<String>,
    /// Attachment kind; `"image"` renders inline.
    #[serde(default)]
    pub attachment_type: Option<String>,
    /// Server timestamp, `"YYYY-MM-DD HH:MM:SS"`.
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    /// Non-empty text body.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().filter(|text| !text.is_empty())
    }

    /// Non-empty attachment filename.
    #[must_use]
    pub fn attachment(&self) -> Option<&str> {
        self.attachment_filename.as_deref().filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.attachment().is_some() && self.attachment_type.as_deref() == Some("image")
    }

    /// Whether `company_name` wrote this message.
    #[must_use]
    pub fn is_from(&self, company_name: &str) -> bool {
        self.sender_name == company_name
    }

    /// Footer line, `"{sender} - {time}"`.
    #[must_use]
    pub fn footer(&self) -> String {
        format!("{} - {}", self.sender_name, display_time(&self.timestamp))
    }
}

/// Time-of-day part of a server timestamp.
///
/// Returns whatever follows the first space, or the whole timestamp when
/// there is no space or nothing after it.
#[must_use]
pub fn display_time(timestamp: &str) -> &str {
    match timestamp.split_once(' ') {
        Some((_, time)) if !time.is_empty() => time,
        _ => timestamp,
    }
}

/// Public path of a stored chat attachment.
#[must_use]
pub fn attachment_path(base: &str, filename: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), filename)
}

/// Response of `POST /chat/upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    /// The file was stored under this name.
    Stored { filename: String },
    /// The server refused the file (type not allowed, missing part, ...).
    Rejected { error: String },
}
