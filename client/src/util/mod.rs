//! Utility helpers shared across the widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (alerts, injected styles, the
//! document-ready hook) from component logic so the components stay small and
//! native builds can stub them out.

pub mod dom;
pub mod legacy_cta;
