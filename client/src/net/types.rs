//! Shared wire-protocol types for the client/server boundary.
//!
//! The schema lives in the `events` crate so the CLI decodes exactly what the
//! widgets decode.

pub use events::{ChatMessage, ClientEvent, Inbound, ServerEvent, UploadResponse};
