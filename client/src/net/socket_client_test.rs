use super::*;
use std::cell::{Cell, RefCell};

#[derive(Default)]
struct Recorder {
    connects: Cell<usize>,
    events: RefCell<Vec<ServerEvent>>,
}

impl EventHandler for Recorder {
    fn on_connect(&self, sender: &EventSender) {
        self.connects.set(self.connects.get() + 1);
        sender.emit(&ClientEvent::Join {
            quote_id: "7".to_owned(),
        });
    }

    fn on_event(&self, event: ServerEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn drain(rx: &mut OutboundFrames) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(Some(frame)) = rx.try_next() {
        out.push(frame);
    }
    out
}

fn inbound(text: &str) -> Inbound {
    events::classify(text).expect("frame should classify")
}

// =============================================================
// EventSender
// =============================================================

#[test]
fn emit_queues_encoded_frame() {
    let (sender, mut rx) = EventSender::channel();
    assert!(sender.emit(&ClientEvent::Typing {
        quote_id: "7".to_owned()
    }));
    assert_eq!(drain(&mut rx), vec![r#"42["typing",{"quote_id":"7"}]"#.to_owned()]);
}

#[test]
fn emit_fails_after_queue_is_dropped() {
    let (sender, rx) = EventSender::channel();
    drop(rx);
    assert!(!sender.emit(&ClientEvent::StopTyping {
        quote_id: "7".to_owned()
    }));
}

// =============================================================
// Handshake
// =============================================================

#[test]
fn handshake_answers_open_with_namespace_connect() {
    let step = handshake_step(&inbound(
        r#"0{"sid":"a","upgrades":[],"pingInterval":25000,"pingTimeout":20000}"#,
    ));
    assert_eq!(step, HandshakeStep::Reply("40".to_owned()));
}

#[test]
fn handshake_answers_ping_and_waits_for_connect() {
    assert_eq!(handshake_step(&inbound("2")), HandshakeStep::Reply("3".to_owned()));
    assert_eq!(handshake_step(&inbound("6")), HandshakeStep::Wait);
    assert_eq!(handshake_step(&inbound(r#"40{"sid":"b"}"#)), HandshakeStep::Connected);
}

#[test]
fn handshake_fails_on_refusal_or_close() {
    assert!(matches!(
        handshake_step(&inbound(r#"44{"message":"denied"}"#)),
        HandshakeStep::Failed(reason) if reason.contains("denied")
    ));
    assert!(matches!(handshake_step(&inbound("1")), HandshakeStep::Failed(_)));
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn dispatch_replies_to_ping_through_queue() {
    let (sender, mut rx) = EventSender::channel();
    let recorder = Recorder::default();
    assert_eq!(dispatch(inbound("2"), &recorder, &sender), Flow::Continue);
    assert_eq!(drain(&mut rx), vec!["3".to_owned()]);
}

#[test]
fn dispatch_forwards_events_to_handler() {
    let (sender, _rx) = EventSender::channel();
    let recorder = Recorder::default();
    dispatch(inbound(r#"42["user_stopped_typing",{}]"#), &recorder, &sender);
    assert_eq!(*recorder.events.borrow(), vec![ServerEvent::UserStoppedTyping]);
}

#[test]
fn every_namespace_connect_rejoins_without_extra_events() {
    let (sender, mut rx) = EventSender::channel();
    let recorder = Recorder::default();
    dispatch(inbound(r#"40{"sid":"a"}"#), &recorder, &sender);
    dispatch(inbound(r#"40{"sid":"b"}"#), &recorder, &sender);
    assert_eq!(recorder.connects.get(), 2);
    assert!(recorder.events.borrow().is_empty());
    assert_eq!(
        drain(&mut rx),
        vec![
            r#"42["join",{"quote_id":"7"}]"#.to_owned(),
            r#"42["join",{"quote_id":"7"}]"#.to_owned(),
        ]
    );
}

#[test]
fn dispatch_reconnects_on_disconnect_or_close() {
    let (sender, _rx) = EventSender::channel();
    let recorder = Recorder::default();
    assert_eq!(dispatch(inbound("41"), &recorder, &sender), Flow::Reconnect);
    assert_eq!(dispatch(inbound("1"), &recorder, &sender), Flow::Reconnect);
    assert_eq!(dispatch(inbound(r#"44{"message":"x"}"#), &recorder, &sender), Flow::Reconnect);
}

// =============================================================
// SocketSession
// =============================================================

#[test]
fn session_close_is_idempotent() {
    let (abort, _registration) = AbortHandle::new_pair();
    let session = SocketSession { abort };
    assert!(!session.abort.is_aborted());
    session.close();
    session.close();
    assert!(session.abort.is_aborted());
}
