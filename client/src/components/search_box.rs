//! Autocomplete dropdown for the page's search input.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page renders `#search-input` inside its search form and an empty
//! `#search-results` list; this widget is mounted into the list, renders the
//! suggestions and listens on the input. Picking a suggestion submits the
//! input's form, so the result page is a full navigation. Responses to
//! superseded queries are dropped by [`SearchState::accept`].

#[cfg(test)]
#[path = "search_box_test.rs"]
mod search_box_test;

use leptos::prelude::*;

use crate::config::WidgetConfig;
use crate::state::search::SearchState;

pub const INPUT_ID: &str = "search-input";
pub const RESULTS_ID: &str = "search-results";

#[component]
pub fn SearchBox(config: WidgetConfig) -> impl IntoView {
    let search = RwSignal::new(SearchState::default());
    let results = result_items(search);
    let visible = Memo::new(move |_| search.with(|s| s.visible));

    #[cfg(feature = "csr")]
    {
        let listeners = StoredValue::new_local(bind_page(search, visible, &config));
        on_cleanup(move || listeners.dispose());

        // Any click outside the input closes the dropdown. Suggestion clicks
        // run their own handler before this one.
        let handle = window_event_listener(leptos::ev::click, move |ev| {
            let input = crate::util::dom::element_by_id::<web_sys::EventTarget>(INPUT_ID);
            if ev.target() != input {
                search.update(SearchState::dismiss);
            }
        });
        on_cleanup(move || handle.remove());
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (config, visible);
    }

    let pick = move |index: usize| {
        let Some(choice) = search.try_update(|s| s.select(index)).flatten() else {
            return;
        };

        #[cfg(feature = "csr")]
        {
            if let Some(input) = crate::util::dom::element_by_id::<web_sys::HtmlInputElement>(INPUT_ID) {
                input.set_value(&choice);
                if let Some(form) = input.form() {
                    let _ = form.submit();
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = choice;
        }
    };

    view! {
        {move || {
            results
                .get()
                .into_iter()
                .enumerate()
                .map(|(index, item)| view! { <li on:click=move |_| pick(index)>{item}</li> })
                .collect_view()
        }}
    }
}

/// Suggestions as their own memo, so hiding the list does not rebuild it.
fn result_items(search: RwSignal<SearchState>) -> Memo<Vec<String>> {
    Memo::new(move |_| search.with(|s| s.results.clone()))
}

/// Listen on the page's input and drive the list's visibility.
#[cfg(feature = "csr")]
fn bind_page(search: RwSignal<SearchState>, visible: Memo<bool>, config: &WidgetConfig) -> Vec<crate::util::dom::Listener> {
    use crate::state::search::QueryPlan;
    use crate::util::dom::{self, Listener};

    if let Some(list) = dom::element_by_id::<web_sys::HtmlElement>(RESULTS_ID) {
        Effect::new(move || {
            let display = if visible.get() { "block" } else { "none" };
            let _ = list.style().set_property("display", display);
        });
    }

    let Some(input) = dom::element_by_id::<web_sys::HtmlInputElement>(INPUT_ID) else {
        return Vec::new();
    };

    let field = input.clone();
    let endpoint = config.autocomplete_url.clone();
    let min_len = config.min_query_len;
    let on_input = Listener::new(&input, "input", move |_| {
        let Some(QueryPlan::Fetch { generation, query }) = search.try_update(|s| s.on_input(&field.value(), min_len)) else {
            return;
        };
        let endpoint = endpoint.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::autocomplete_search(&endpoint, &query).await {
                Ok(results) => {
                    search.try_update(|s| s.accept(generation, results));
                }
                Err(e) => leptos::logging::warn!("autocomplete failed: {e}"),
            }
        });
    });

    vec![on_input]
}
