//! Widget components mounted into server-rendered pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each component owns its state signals and, where it needs realtime
//! events, its own socket session. Nothing is shared through context because
//! the widgets mount into unrelated parts of the page.

pub mod chat_widget;
pub mod notification_badge;
pub mod search_box;
