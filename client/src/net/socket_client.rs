//! Socket.IO client session for real-time events.
//!
//! A [`SocketSession`] owns one connection lifecycle: WebSocket open,
//! Engine.IO handshake, namespace connect, heartbeat replies, event dispatch,
//! and reconnection with exponential backoff. Widgets create one on mount and
//! close it on unmount; nothing is shared between widgets.
//!
//! Outgoing events go through an [`EventSender`] backed by an unbounded
//! queue. Events emitted while disconnected wait in the queue and are flushed
//! once the namespace is connected again.
//!
//! All WebSocket I/O is gated behind `#[cfg(feature = "csr")]`; the frame
//! handling decisions ([`handshake_step`], [`dispatch`]) are plain functions
//! so they can be tested natively.

#[cfg(test)]
#[path = "socket_client_test.rs"]
mod socket_client_test;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::future::AbortHandle;

use super::types::{ClientEvent, Inbound, ServerEvent};

/// Receiving half of the outbound queue, consumed by the session loop.
pub type OutboundFrames = UnboundedReceiver<String>;

/// Cloneable handle for emitting events on a session.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: UnboundedSender<String>,
}

impl EventSender {
    /// Create a sender and the queue a session will drain.
    #[must_use]
    pub fn channel() -> (Self, OutboundFrames) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    /// Queue an event. Returns `false` once the session is gone.
    pub fn emit(&self, event: &ClientEvent) -> bool {
        self.send_raw(event.encode())
    }

    pub(crate) fn send_raw(&self, frame: String) -> bool {
        self.tx.unbounded_send(frame).is_ok()
    }
}

/// Receiver of session callbacks.
pub trait EventHandler {
    /// The default namespace (re)connected. Rooms must be joined here.
    fn on_connect(&self, sender: &EventSender) {
        let _ = sender;
    }

    /// An application event arrived.
    fn on_event(&self, event: ServerEvent);
}

/// Next move while waiting for the namespace connect.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HandshakeStep {
    /// Write this frame straight to the socket.
    Reply(String),
    /// The namespace is connected; start regular I/O.
    Connected,
    /// Give up on this connection attempt.
    Failed(String),
    /// Keep reading.
    Wait,
}

#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub(crate) fn handshake_step(inbound: &Inbound) -> HandshakeStep {
    match inbound {
        Inbound::Open(_) => HandshakeStep::Reply(events::connect_frame()),
        Inbound::Ping(payload) => HandshakeStep::Reply(events::pong_frame(payload)),
        Inbound::Connected => HandshakeStep::Connected,
        Inbound::ConnectRefused(data) => HandshakeStep::Failed(match data {
            Some(data) => format!("connect refused: {data}"),
            None => "connect refused".to_owned(),
        }),
        Inbound::Closed | Inbound::Disconnected => HandshakeStep::Failed("closed during handshake".to_owned()),
        Inbound::Event(_) | Inbound::Ignored => HandshakeStep::Wait,
    }
}

/// Whether the I/O loop keeps the current connection.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Reconnect,
}

/// Act on one frame received after the handshake.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub(crate) fn dispatch(inbound: Inbound, handler: &dyn EventHandler, sender: &EventSender) -> Flow {
    match inbound {
        Inbound::Ping(payload) => {
            sender.send_raw(events::pong_frame(&payload));
            Flow::Continue
        }
        Inbound::Event(event) => {
            handler.on_event(event);
            Flow::Continue
        }
        Inbound::Connected => {
            handler.on_connect(sender);
            Flow::Continue
        }
        Inbound::Open(_) => {
            sender.send_raw(events::connect_frame());
            Flow::Continue
        }
        Inbound::ConnectRefused(_) | Inbound::Disconnected | Inbound::Closed => Flow::Reconnect,
        Inbound::Ignored => Flow::Continue,
    }
}

/// A running realtime session. Closing it (or aborting via the handle)
/// drops the socket and stops reconnecting.
#[derive(Clone, Debug)]
pub struct SocketSession {
    abort: AbortHandle,
}

impl SocketSession {
    /// Spawn the connection loop as a local task.
    #[cfg(feature = "csr")]
    pub fn spawn(
        config: &crate::config::WidgetConfig,
        sender: EventSender,
        outbound: OutboundFrames,
        handler: std::rc::Rc<dyn EventHandler>,
    ) -> Self {
        use futures::future::Abortable;

        let (abort, registration) = AbortHandle::new_pair();
        let task = Abortable::new(session_loop(config.clone(), sender, outbound, handler), registration);
        leptos::task::spawn_local(async move {
            let _ = task.await;
        });
        Self { abort }
    }

    /// Stop the session. Idempotent.
    pub fn close(&self) {
        self.abort.abort();
    }
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "csr")]
async fn session_loop(
    config: crate::config::WidgetConfig,
    sender: EventSender,
    mut outbound: OutboundFrames,
    handler: std::rc::Rc<dyn EventHandler>,
) {
    let mut backoff_ms = config.reconnect_initial_ms;

    loop {
        let url = match page_socket_url(&config.socket_path) {
            Ok(url) => url,
            Err(e) => {
                leptos::logging::error!("realtime disabled: {e}");
                return;
            }
        };

        match connect_and_run(&url, &sender, &mut outbound, handler.as_ref()).await {
            Ok(()) => {
                log::info!("socket disconnected");
                backoff_ms = config.reconnect_initial_ms;
            }
            Err(e) => {
                leptos::logging::warn!("socket error: {e}");
            }
        }

        // Exponential backoff before reconnect.
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = config.next_backoff(backoff_ms);
    }
}

/// Socket.IO endpoint on the page's own origin.
#[cfg(feature = "csr")]
fn page_socket_url(socket_path: &str) -> Result<String, super::error::ClientError> {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or_else(|| super::error::ClientError::Socket("no window location".to_owned()))?;
    Ok(events::websocket_url(&origin, socket_path)?)
}

/// Connect, complete the handshake, then pump frames until disconnect.
///
/// Returns `Ok` only if the namespace connected before the stream ended.
#[cfg(feature = "csr")]
async fn connect_and_run(
    url: &str,
    sender: &EventSender,
    outbound: &mut OutboundFrames,
    handler: &dyn EventHandler,
) -> Result<(), super::error::ClientError> {
    use super::error::ClientError;
    use futures::{SinkExt, StreamExt};
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let ws = WebSocket::open(url).map_err(|e| ClientError::Socket(e.to_string()))?;
    let (mut ws_write, mut ws_read) = ws.split();

    // Handshake: open -> "40" -> namespace connect ack.
    loop {
        let Some(msg) = ws_read.next().await else {
            return Err(ClientError::Socket("closed during handshake".to_owned()));
        };
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(_)) => continue,
            Err(e) => return Err(ClientError::Socket(e.to_string())),
        };
        log::debug!("socket <- {text}");
        match handshake_step(&events::classify(&text)?) {
            HandshakeStep::Reply(frame) => {
                ws_write
                    .send(Message::Text(frame))
                    .await
                    .map_err(|e| ClientError::Socket(e.to_string()))?;
            }
            HandshakeStep::Connected => break,
            HandshakeStep::Failed(reason) => return Err(ClientError::Socket(reason)),
            HandshakeStep::Wait => {}
        }
    }

    handler.on_connect(sender);

    // Forward queued frames to the socket.
    let send_task = async {
        while let Some(frame) = outbound.next().await {
            log::debug!("socket -> {frame}");
            if ws_write.send(Message::Text(frame)).await.is_err() {
                break;
            }
        }
    };

    // Receive loop: decode and dispatch incoming frames.
    let recv_task = async {
        while let Some(msg) = ws_read.next().await {
            match msg {
                Ok(Message::Text(text)) => match events::classify(&text) {
                    Ok(inbound) => {
                        if dispatch(inbound, handler, sender) == Flow::Reconnect {
                            break;
                        }
                    }
                    Err(e) => leptos::logging::warn!("dropping socket frame: {e}"),
                },
                Ok(Message::Bytes(_)) => {}
                Err(e) => {
                    leptos::logging::warn!("socket recv error: {e}");
                    break;
                }
            }
        }
    };

    // When either side finishes, the connection is done.
    futures::future::select(Box::pin(send_task), Box::pin(recv_task)).await;

    Ok(())
}
