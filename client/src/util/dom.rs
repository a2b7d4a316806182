//! Small DOM helpers used by the widgets and the page bootstrap.
//!
//! Requires a browser environment; native builds get no-op stubs so the
//! components compile and the pure helpers stay testable.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// Inline style of the unread badge span.
pub const BADGE_STYLE: &str = "position:absolute;top:0;right:-5px;background:red;color:white;\
border-radius:50%;padding:2px 5px;font-size:0.7rem;";

/// Animation applied to the notification link on every update.
pub const PULSE_ANIMATION: &str = "pulse 0.5s 2";

/// Keyframes backing [`PULSE_ANIMATION`].
pub const PULSE_KEYFRAMES: &str = "@keyframes pulse { 0% { transform: scale(1); } \
50% { transform: scale(1.2); } 100% { transform: scale(1); } }";

#[cfg(feature = "csr")]
const PULSE_STYLE_ID: &str = "connecta-pulse-keyframes";

/// Treat blank attribute values as absent.
#[must_use]
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Read a non-blank attribute from an element.
#[cfg(feature = "csr")]
#[must_use]
pub fn attribute(el: &web_sys::Element, name: &str) -> Option<String> {
    non_empty(el.get_attribute(name))
}

/// Element with `id`, cast to `T`.
#[cfg(feature = "csr")]
#[must_use]
pub fn element_by_id<T: wasm_bindgen::JsCast>(id: &str) -> Option<T> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Event listener on an element the page rendered. Removed on drop.
#[cfg(feature = "csr")]
pub struct Listener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>,
}

#[cfg(feature = "csr")]
impl Listener {
    pub fn new(target: &web_sys::EventTarget, event: &'static str, f: impl FnMut(web_sys::Event) + 'static) -> Self {
        use wasm_bindgen::JsCast;

        let callback = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::Event)>::new(f);
        let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            callback,
        }
    }
}

#[cfg(feature = "csr")]
impl Drop for Listener {
    fn drop(&mut self) {
        use wasm_bindgen::JsCast;

        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Show a blocking alert.
pub fn alert(message: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = message;
    }
}

/// Inject the pulse keyframes into `<head>` once per page.
pub fn ensure_pulse_keyframes() {
    #[cfg(feature = "csr")]
    {
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if doc.get_element_by_id(PULSE_STYLE_ID).is_some() {
            return;
        }
        let (Some(head), Ok(style)) = (doc.head(), doc.create_element("style")) else {
            return;
        };
        style.set_id(PULSE_STYLE_ID);
        style.set_text_content(Some(PULSE_KEYFRAMES));
        let _ = head.append_child(&style);
    }
}

/// Restart the pulse animation on the element with `id`.
///
/// Clearing the property and forcing a layout read makes the browser replay
/// the animation even when the value does not change.
pub fn restart_pulse(id: &str) {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        else {
            return;
        };
        let style = el.style();
        let _ = style.set_property("animation", "none");
        let _ = el.offset_width();
        let _ = style.set_property("animation", PULSE_ANIMATION);
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = id;
    }
}

/// Run `f` once the document is parsed: immediately if it already is,
/// otherwise on `DOMContentLoaded`.
#[cfg(feature = "csr")]
pub fn on_document_ready(f: impl FnOnce() + 'static) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if doc.ready_state() != "loading" {
        f();
        return;
    }
    let cb = Closure::<dyn FnMut()>::once(f);
    let _ = doc.add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref());
    cb.forget();
}
