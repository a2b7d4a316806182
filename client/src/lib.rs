//! # connecta-widgets
//!
//! Leptos + WASM widgets for the Connecta B2B pages: the quote chat, the
//! notification badge, the search autocomplete box, and the legacy
//! call-to-action handler.
//!
//! The server renders plain HTML; [`app::start`] runs once the document is
//! parsed and mounts each widget into the elements its page carries. Pages
//! without a widget's mount point simply skip it.
//!
//! Everything that needs a browser sits behind the `csr` feature. Without it
//! the crate builds natively so the state models and protocol glue can be
//! unit-tested.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;
