//! Click handler for the retired registration call-to-action.
//!
//! Current templates no longer render the button, so this is normally a
//! no-op. Old cached pages still get the notice instead of a dead `#` link.

/// Class the old button carried.
pub const SELECTOR: &str = ".cta-button-old-logic";

/// Notice shown instead of navigating.
pub const NOTICE: &str = "The company registration page is under development. Please check back soon!";

/// Attach the click handler if the button is on the page.
pub fn attach() {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let Some(button) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(SELECTOR).ok().flatten())
        else {
            return;
        };
        let cb = Closure::<dyn FnMut(web_sys::Event)>::new(|ev: web_sys::Event| {
            ev.prevent_default();
            super::dom::alert(NOTICE);
        });
        let _ = button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        cb.forget();
    }
}
