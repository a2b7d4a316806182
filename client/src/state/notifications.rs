//! Unread notification badge state.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use events::ServerEvent;

/// Where the badge count is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeSlot {
    /// The page already renders a count span inside the link.
    Existing,
    /// No span yet; the widget renders one on the first event.
    Created,
}

impl BadgeSlot {
    #[must_use]
    pub fn for_link(has_span: bool) -> Self {
        if has_span { Self::Existing } else { Self::Created }
    }
}

/// Last unread count pushed by the server.
///
/// `unread` stays `None` until the first event, which is when the badge
/// element gets created. `pulse_seq` bumps on every event so the view can
/// restart the pulse animation even when the count did not change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BadgeState {
    pub unread: Option<u64>,
    pub pulse_seq: u64,
}

impl BadgeState {
    /// Apply one broker event. Returns `true` for notification events.
    pub fn apply(&mut self, event: &ServerEvent) -> bool {
        let ServerEvent::NewNotification { unread_count } = event else {
            return false;
        };
        self.unread = Some(*unread_count);
        self.pulse_seq = self.pulse_seq.wrapping_add(1);
        true
    }

    /// Badge text, if the badge should exist.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.unread.map(|count| count.to_string())
    }

    /// Text of the span the widget renders itself. `None` while that span
    /// should not exist.
    #[must_use]
    pub fn created_span_text(&self, slot: BadgeSlot) -> Option<String> {
        match slot {
            BadgeSlot::Existing => None,
            BadgeSlot::Created => self.text(),
        }
    }

    /// Text to write into the page's span. `None` leaves the server-rendered
    /// count alone.
    #[must_use]
    pub fn existing_span_text(&self, slot: BadgeSlot) -> Option<String> {
        match slot {
            BadgeSlot::Existing => self.text(),
            BadgeSlot::Created => None,
        }
    }
}
