//! Networking modules for HTTP + Socket.IO realtime events.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the upload and autocomplete endpoints, `socket_client`
//! manages the realtime connection lifecycle, `chat_room` turns chat UI
//! actions into outgoing events, and `types` re-exports the shared wire
//! schema from the `events` crate.

pub mod api;
pub mod chat_room;
pub mod error;
pub mod socket_client;
pub mod types;
