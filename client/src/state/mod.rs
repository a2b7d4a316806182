//! Client-side state models.
//!
//! DESIGN
//! ======
//! State is split by widget (`chat`, `notifications`, `search`) plus the
//! shared `typing` debounce, so components depend on small focused models and
//! every transition can be tested without a browser.

pub mod chat;
pub mod notifications;
pub mod search;
pub mod typing;
