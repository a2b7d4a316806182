//! Page bootstrap: find mount points, mount widgets, tear down on leave.
//!
//! SYSTEM CONTEXT
//! ==============
//! One bundle serves every server-rendered page. The page renders all
//! widget markup; each widget binds to those elements and is skipped when
//! the page does not carry them. Mounted
//! widgets are kept alive in a thread-local list until `pagehide`, when
//! dropping their unmount handles runs every component's cleanup (closing
//! socket sessions and disarming timers).

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::components::chat_widget;
use crate::config::WidgetConfig;
use crate::state::chat::{RoomContext, RoomContextError};

/// Container of the quote chat.
pub const CHAT_SELECTOR: &str = ".chat-container";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChatMountError {
    #[error(transparent)]
    Room(#[from] RoomContextError),
    #[error("page has no `#{0}` element")]
    MissingElement(&'static str),
}

/// First of `ids` the page does not carry.
pub fn missing_element(ids: &[&'static str], present: impl Fn(&str) -> bool) -> Option<&'static str> {
    ids.iter().copied().find(|id| !present(id))
}

/// Everything the chat needs from the page, resolved up front.
///
/// `lookup` receives full attribute names (`data-quote-id`, ...) of the
/// container; `present` answers whether an element id exists.
///
/// # Errors
///
/// Returns [`ChatMountError`] when the container lacks its room identity or
/// a required chat element is missing.
pub fn chat_mount(
    defaults: &WidgetConfig,
    lookup: impl Fn(&str) -> Option<String>,
    present: impl Fn(&str) -> bool,
) -> Result<(RoomContext, WidgetConfig), ChatMountError> {
    let room = RoomContext::from_attributes(lookup("data-quote-id"), lookup("data-company-name"))?;
    if let Some(id) = missing_element(&chat_widget::REQUIRED_IDS, present) {
        return Err(ChatMountError::MissingElement(id));
    }
    let config = defaults.clone().with_overrides(lookup);
    Ok((room, config))
}

#[cfg(feature = "csr")]
thread_local! {
    static MOUNTED: std::cell::RefCell<Vec<Box<dyn std::any::Any>>> = const { std::cell::RefCell::new(Vec::new()) };
}

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    crate::util::dom::on_document_ready(mount_page);
}

/// Mount every widget whose mount point is on this page.
#[cfg(feature = "csr")]
pub fn mount_page() {
    use leptos::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::components::chat_widget::{ChatWidget, MESSAGES_ID};
    use crate::components::notification_badge::{self, LINK_ID, NotificationBadge};
    use crate::components::search_box::{self, SearchBox};
    use crate::state::notifications::BadgeSlot;
    use crate::util::{dom, legacy_cta};

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let defaults = WidgetConfig::default();

    if let Some(container) = document.query_selector(CHAT_SELECTOR).ok().flatten() {
        let mounted = chat_mount(
            &defaults,
            |name| dom::attribute(&container, name),
            |id| document.get_element_by_id(id).is_some(),
        );
        match (mounted, dom::element_by_id::<web_sys::HtmlElement>(MESSAGES_ID)) {
            (Ok((room, config)), Some(messages)) => {
                keep(leptos::mount::mount_to(messages, move || view! { <ChatWidget room=room config=config/> }));
            }
            (Err(e), _) => leptos::logging::error!("chat disabled: {e}"),
            (Ok(_), None) => leptos::logging::error!("chat disabled: `#{MESSAGES_ID}` is not an HTML element"),
        }
    }

    if let Some(link) = dom::element_by_id::<web_sys::HtmlElement>(LINK_ID) {
        let config = defaults.clone().with_overrides(|name| dom::attribute(&link, name));
        let slot = BadgeSlot::for_link(notification_badge::existing_span().is_some());
        keep(leptos::mount::mount_to(link, move || view! { <NotificationBadge config=config slot=slot/> }));
    }

    if let Some(input) = document.get_element_by_id(search_box::INPUT_ID) {
        match dom::element_by_id::<web_sys::HtmlElement>(search_box::RESULTS_ID) {
            Some(list) => {
                let config = defaults.clone().with_overrides(|name| dom::attribute(&input, name));
                keep(leptos::mount::mount_to(list, move || view! { <SearchBox config=config/> }));
            }
            None => leptos::logging::warn!("search autocomplete disabled: no `#{}` list", search_box::RESULTS_ID),
        }
    }

    legacy_cta::attach();

    let on_leave = Closure::<dyn FnMut()>::new(teardown);
    let _ = window.add_event_listener_with_callback("pagehide", on_leave.as_ref().unchecked_ref());
    on_leave.forget();

    leptos::logging::log!("Connecta widgets loaded");
}

#[cfg(feature = "csr")]
fn keep<T: 'static>(handle: T) {
    MOUNTED.with(|mounted| mounted.borrow_mut().push(Box::new(handle)));
}

/// Unmount every widget. Safe to call more than once.
#[cfg(feature = "csr")]
pub fn teardown() {
    let handles = MOUNTED.with(|mounted| std::mem::take(&mut *mounted.borrow_mut()));
    drop(handles);
}
