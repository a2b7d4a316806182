//! Unread-notification badge on the header link.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted into `#notification-link`. When the page already renders a count
//! span inside the link, that span is updated in place; otherwise the widget
//! renders its own span with the first `new_notification` event. Either way
//! it shows whatever count the server pushed last.

use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::net::socket_client::{EventHandler, EventSender};
use crate::net::types::ServerEvent;
use crate::state::notifications::{BadgeSlot, BadgeState};
use crate::util::dom;

/// Id of the link the badge is mounted into and pulses.
pub const LINK_ID: &str = "notification-link";

struct BadgeEvents {
    badge: RwSignal<BadgeState>,
}

impl EventHandler for BadgeEvents {
    fn on_event(&self, event: ServerEvent) {
        #[cfg(feature = "csr")]
        log::debug!("realtime event: {} {event:?}", event.name());
        self.badge.update(|badge| {
            badge.apply(&event);
        });
    }
}

/// Count badge that pulses on every update.
#[component]
pub fn NotificationBadge(config: WidgetConfig, slot: BadgeSlot) -> impl IntoView {
    let badge = RwSignal::new(BadgeState::default());
    dom::ensure_pulse_keyframes();

    let (sender, outbound) = EventSender::channel();
    let handler = BadgeEvents { badge };

    #[cfg(feature = "csr")]
    {
        use crate::net::socket_client::SocketSession;

        let session = SocketSession::spawn(&config, sender, outbound, std::rc::Rc::new(handler));
        on_cleanup(move || session.close());
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, sender, outbound, handler);
    }

    Effect::new(move || {
        if badge.with(|b| b.pulse_seq) > 0 {
            dom::restart_pulse(LINK_ID);
        }
    });

    #[cfg(feature = "csr")]
    if let Some(span) = existing_span() {
        Effect::new(move || {
            if let Some(text) = badge.with(|b| b.existing_span_text(slot)) {
                span.set_text_content(Some(&text));
            }
        });
    }

    view! {
        <Show when=move || badge.with(|b| b.created_span_text(slot).is_some())>
            <span class="notification-count" style=dom::BADGE_STYLE>
                {move || badge.with(|b| b.created_span_text(slot)).unwrap_or_default()}
            </span>
        </Show>
    }
}

/// First span the page rendered inside the link.
#[cfg(feature = "csr")]
pub fn existing_span() -> Option<web_sys::Element> {
    dom::element_by_id::<web_sys::Element>(LINK_ID)?.query_selector("span").ok().flatten()
}
