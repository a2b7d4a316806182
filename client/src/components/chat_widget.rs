//! Quote chat: message feed bound to the page's chat controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page renders the chat markup; this widget is mounted into
//! `#messages` and renders only the bubbles. The typing indicator, form,
//! input and optional attachment controls are the page's own elements and
//! get listeners here. Sending never renders locally and waits for the
//! broker echo. Typing signals and sends go through [`ChatRoom`], which owns
//! the debounce.

#[cfg(test)]
#[path = "chat_widget_test.rs"]
mod chat_widget_test;

use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::net::chat_room::ChatRoom;
use crate::net::socket_client::{EventHandler, EventSender};
use crate::net::types::ServerEvent;
use crate::state::chat::{AttachmentView, Bubble, ChatState, RoomContext};

pub const MESSAGES_ID: &str = "messages";
pub const FORM_ID: &str = "message-form";
pub const INPUT_ID: &str = "message-input";
pub const TYPING_INDICATOR_ID: &str = "typing-indicator";
pub const ATTACH_BUTTON_ID: &str = "attach-button";
pub const FILE_INPUT_ID: &str = "file-input";

/// Page elements the chat cannot run without.
pub const REQUIRED_IDS: [&str; 4] = [MESSAGES_ID, FORM_ID, INPUT_ID, TYPING_INDICATOR_ID];

/// Routes socket callbacks into the widget's signals.
struct ChatEvents {
    chat: RwSignal<ChatState>,
    room: StoredValue<ChatRoom>,
    attachment_base: String,
}

impl EventHandler for ChatEvents {
    fn on_connect(&self, _sender: &EventSender) {
        self.room.try_with_value(|room| {
            room.join();
        });
    }

    fn on_event(&self, event: ServerEvent) {
        let Some(context) = self.room.try_with_value(|room| room.room().clone()) else {
            return;
        };
        self.chat.update(|state| {
            state.apply(&event, &context, &self.attachment_base);
        });
    }
}

/// Chat feed for one quote room.
#[component]
pub fn ChatWidget(room: RoomContext, config: WidgetConfig) -> impl IntoView {
    let chat = RwSignal::new(ChatState::default());

    let (sender, outbound) = EventSender::channel();
    let chat_room = StoredValue::new(ChatRoom::new(room, sender.clone()));
    let handler = ChatEvents {
        chat,
        room: chat_room,
        attachment_base: config.attachment_base.clone(),
    };

    #[cfg(feature = "csr")]
    {
        use crate::net::socket_client::SocketSession;

        let session = SocketSession::spawn(&config, sender, outbound, std::rc::Rc::new(handler));
        let listeners = StoredValue::new_local(bind_page(chat, chat_room, &config));
        on_cleanup(move || {
            session.close();
            listeners.dispose();
            chat_room.update_value(ChatRoom::teardown);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (sender, outbound, handler, config);
    }

    view! {
        <For
            each=move || chat.with(|state| state.bubbles.clone())
            key=|bubble| bubble.key
            children=move |bubble| view! { <MessageBubble bubble=bubble/> }
        />
    }
}

/// One rendered message.
#[component]
fn MessageBubble(bubble: Bubble) -> impl IntoView {
    let class = bubble.css_class();
    let attachment = bubble.attachment.map(|attachment| match attachment {
        AttachmentView::Image { href } => {
            let src = href.clone();
            view! {
                <a href=href target="_blank">
                    <img src=src class="message-attachment" alt="attachment"/>
                </a>
            }
            .into_any()
        }
        AttachmentView::Link { href, label } => view! {
            <a href=href target="_blank">{label}</a>
        }
        .into_any(),
    });

    view! {
        <div class=class>
            {bubble.text.map(|text| view! { <div class="message-text">{text}</div> })}
            {attachment}
            <div class="message-info">{bubble.footer}</div>
        </div>
    }
}

/// Hook the page's chat controls up to the room.
///
/// Attachment controls are bound only when attachments are enabled and the
/// page carries both `#attach-button` and `#file-input`.
#[cfg(feature = "csr")]
fn bind_page(chat: RwSignal<ChatState>, chat_room: StoredValue<ChatRoom>, config: &WidgetConfig) -> Vec<crate::util::dom::Listener> {
    use web_sys::{HtmlElement, HtmlFormElement, HtmlInputElement};

    use crate::util::dom::{self, Listener};

    let mut listeners = Vec::new();

    if let Some(messages) = dom::element_by_id::<HtmlElement>(MESSAGES_ID) {
        // Keep the newest message in view, including on first render.
        Effect::new(move || {
            let _ = chat.with(|state| state.bubbles.len());
            messages.set_scroll_top(messages.scroll_height());
        });
    }

    if let Some(indicator) = dom::element_by_id::<HtmlElement>(TYPING_INDICATOR_ID) {
        Effect::new(move || {
            chat.with(|state| indicator.set_text_content(Some(&state.typing_indicator)));
        });
    }

    let Some(input) = dom::element_by_id::<HtmlInputElement>(INPUT_ID) else {
        return listeners;
    };

    let typing_timeout_ms = config.typing_timeout_ms;
    listeners.push(Listener::new(&input, "input", move |_| {
        let Some(generation) = chat_room.try_update_value(ChatRoom::keystroke) else {
            return;
        };
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(typing_timeout_ms))).await;
            chat_room.try_update_value(|room| room.typing_expired(generation));
        });
    }));

    if let Some(form) = dom::element_by_id::<HtmlFormElement>(FORM_ID) {
        let field = input.clone();
        listeners.push(Listener::new(&form, "submit", move |ev| {
            ev.prevent_default();
            if chat_room.try_update_value(|room| room.send_text(&field.value())) == Some(true) {
                field.set_value("");
            }
        }));
    }

    if !config.attachments {
        return listeners;
    }
    let (Some(button), Some(file_input)) = (
        dom::element_by_id::<HtmlElement>(ATTACH_BUTTON_ID),
        dom::element_by_id::<HtmlInputElement>(FILE_INPUT_ID),
    ) else {
        return listeners;
    };

    let picker = file_input.clone();
    listeners.push(Listener::new(&button, "click", move |ev| {
        ev.prevent_default();
        picker.click();
    }));

    let upload_url = config.upload_url.clone();
    let source = file_input.clone();
    listeners.push(Listener::new(&file_input, "change", move |_| {
        upload_selected(source.clone(), chat_room, upload_url.clone());
    }));

    listeners
}

/// Upload the file picked in the file input, then post it to the room.
///
/// The input is reset afterwards whatever happened so the same file can be
/// picked again.
#[cfg(feature = "csr")]
fn upload_selected(file_input: web_sys::HtmlInputElement, chat_room: StoredValue<ChatRoom>, upload_url: String) {
    use crate::net::api::upload_attachment;
    use crate::net::types::UploadResponse;
    use crate::util::dom;

    let Some(file) = file_input.files().and_then(|files| files.get(0)) else {
        return;
    };

    leptos::task::spawn_local(async move {
        match upload_attachment(&upload_url, &file).await {
            Ok(UploadResponse::Stored { filename }) => {
                chat_room.try_update_value(|room| room.send_attachment(filename));
            }
            Ok(UploadResponse::Rejected { error }) => dom::alert(&error),
            Err(e) => leptos::logging::error!("attachment upload failed: {e}"),
        }
        file_input.set_value("");
    });
}
