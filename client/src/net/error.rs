//! Error type for HTTP and realtime operations.
//!
//! Browser code logs these and degrades; nothing here is fatal to the page.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status and no usable body.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The realtime connection failed or was refused.
    #[error("socket error: {0}")]
    Socket(String),
    /// A realtime frame could not be decoded.
    #[error(transparent)]
    Codec(#[from] events::CodecError),
    /// Browser-only operation invoked in a native build.
    #[error("not available outside the browser")]
    Unavailable,
}

#[cfg(feature = "csr")]
impl From<gloo_net::Error> for ClientError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}
