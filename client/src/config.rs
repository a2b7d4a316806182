//! Widget configuration: defaults plus per-mount-point overrides.
//!
//! Every mount element may carry `data-*` attributes overriding the defaults,
//! so a page template can point a widget at different endpoints without a
//! rebuild. Unparseable numbers keep the default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Endpoints, timings and thresholds shared by the widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// HTTP path of the Socket.IO endpoint.
    pub socket_path: String,
    /// Multipart upload endpoint for chat attachments.
    pub upload_url: String,
    /// Suggestion endpoint for the search box.
    pub autocomplete_url: String,
    /// Public folder stored attachments are served from.
    pub attachment_base: String,
    /// Quiet period after the last keystroke before `stop_typing` is sent.
    pub typing_timeout_ms: u32,
    /// Shortest query that triggers a suggestion request.
    pub min_query_len: usize,
    /// Whether the chat renders its attach button and file picker.
    pub attachments: bool,
    /// First reconnect delay.
    pub reconnect_initial_ms: u32,
    /// Upper bound of the doubling reconnect delay.
    pub reconnect_max_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            socket_path: events::DEFAULT_SOCKET_PATH.to_owned(),
            upload_url: "/chat/upload".to_owned(),
            autocomplete_url: "/autocomplete_search".to_owned(),
            attachment_base: "/uploads/chat".to_owned(),
            typing_timeout_ms: 1500,
            min_query_len: 2,
            attachments: true,
            reconnect_initial_ms: 1000,
            reconnect_max_ms: 10_000,
        }
    }
}

impl WidgetConfig {
    /// Apply overrides read through `lookup`, which receives full attribute
    /// names such as `data-upload-url`.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        if let Some(v) = read("data-socket-path") {
            self.socket_path = v;
        }
        if let Some(v) = read("data-upload-url") {
            self.upload_url = v;
        }
        if let Some(v) = read("data-autocomplete-url") {
            self.autocomplete_url = v;
        }
        if let Some(v) = read("data-attachment-base") {
            self.attachment_base = v;
        }
        if let Some(v) = read("data-typing-timeout-ms").and_then(|v| v.parse().ok()) {
            self.typing_timeout_ms = v;
        }
        if let Some(v) = read("data-min-query-len").and_then(|v| v.parse().ok()) {
            self.min_query_len = v;
        }
        if let Some(v) = read("data-attachments") {
            self.attachments = !matches!(v.as_str(), "off" | "false" | "0");
        }
        self
    }

    /// Delay to wait after `current_ms` failed.
    #[must_use]
    pub fn next_backoff(&self, current_ms: u32) -> u32 {
        current_ms.saturating_mul(2).min(self.reconnect_max_ms)
    }
}
