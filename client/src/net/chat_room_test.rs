use super::*;
use crate::net::socket_client::OutboundFrames;

fn chat_room() -> (ChatRoom, OutboundFrames) {
    let (sender, rx) = EventSender::channel();
    let room = RoomContext {
        quote_id: "42".to_owned(),
        company_name: "Acme".to_owned(),
    };
    (ChatRoom::new(room, sender), rx)
}

fn drain(rx: &mut OutboundFrames) -> Vec<String> {
    let mut out = Vec::new();
    while let Ok(Some(frame)) = rx.try_next() {
        out.push(frame);
    }
    out
}

fn count(frames: &[String], event: &str) -> usize {
    let prefix = format!(r#"42["{event}""#);
    frames.iter().filter(|f| f.starts_with(&prefix)).count()
}

#[test]
fn join_emits_room_id() {
    let (room, mut rx) = chat_room();
    assert!(room.join());
    assert_eq!(drain(&mut rx), vec![r#"42["join",{"quote_id":"42"}]"#.to_owned()]);
}

#[test]
fn every_keystroke_emits_typing() {
    let (mut room, mut rx) = chat_room();
    room.keystroke();
    room.keystroke();
    room.keystroke();
    let frames = drain(&mut rx);
    assert_eq!(count(&frames, "typing"), 3);
    assert_eq!(count(&frames, "stop_typing"), 0);
}

#[test]
fn rapid_keystrokes_yield_one_stop_after_last() {
    let (mut room, mut rx) = chat_room();
    let timers: Vec<u64> = (0..4).map(|_| room.keystroke()).collect();
    drain(&mut rx);

    for generation in &timers {
        room.typing_expired(*generation);
    }
    let frames = drain(&mut rx);
    assert_eq!(frames, vec![r#"42["stop_typing",{"quote_id":"42"}]"#.to_owned()]);
}

#[test]
fn send_text_stops_typing_then_sends_trimmed_message() {
    let (mut room, mut rx) = chat_room();
    let generation = room.keystroke();
    drain(&mut rx);

    assert!(room.send_text("  hello  "));
    assert_eq!(
        drain(&mut rx),
        vec![
            r#"42["stop_typing",{"quote_id":"42"}]"#.to_owned(),
            r#"42["send_message",{"attachment":null,"message":"hello","quote_id":"42"}]"#.to_owned(),
        ]
    );

    // The cancelled timer must not send a second stop.
    assert!(!room.typing_expired(generation));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn blank_submit_is_a_noop() {
    let (mut room, mut rx) = chat_room();
    assert!(!room.send_text("   "));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn uploaded_file_is_sent_with_null_message() {
    let (mut room, mut rx) = chat_room();
    assert!(room.send_attachment("x.png".to_owned()));
    let frames = drain(&mut rx);
    assert_eq!(
        frames.last().map(String::as_str),
        Some(r#"42["send_message",{"attachment":"x.png","message":null,"quote_id":"42"}]"#)
    );
}

#[test]
fn empty_attachment_name_is_rejected() {
    let (mut room, mut rx) = chat_room();
    assert!(!room.send_attachment(String::new()));
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn teardown_disarms_pending_stop() {
    let (mut room, mut rx) = chat_room();
    let generation = room.keystroke();
    room.teardown();
    drain(&mut rx);
    assert!(!room.typing_expired(generation));
    assert!(drain(&mut rx).is_empty());
}
