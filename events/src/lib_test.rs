use super::*;

#[test]
fn classify_open_frame() {
    let inbound = classify(r#"0{"sid":"s1","upgrades":[],"pingInterval":25000,"pingTimeout":5000}"#)
        .expect("open should classify");
    assert!(matches!(inbound, Inbound::Open(h) if h.sid == "s1"));
}

#[test]
fn classify_ping_needs_pong_reply() {
    assert_eq!(classify("2").expect("ping"), Inbound::Ping(String::new()));
    assert_eq!(pong_frame(""), "3");
}

#[test]
fn classify_connect_ack_on_default_namespace() {
    assert_eq!(classify(r#"40{"sid":"abc"}"#).expect("connect"), Inbound::Connected);
}

#[test]
fn classify_ignores_other_namespaces() {
    assert_eq!(classify(r#"40/admin,{"sid":"abc"}"#).expect("connect"), Inbound::Ignored);
    assert_eq!(classify(r#"42/admin,["message",{}]"#).expect("event"), Inbound::Ignored);
}

#[test]
fn classify_connect_error_keeps_payload() {
    let inbound = classify(r#"44{"message":"unauthorized"}"#).expect("connect error");
    assert_eq!(
        inbound,
        Inbound::ConnectRefused(Some(serde_json::json!({"message": "unauthorized"})))
    );
}

#[test]
fn classify_message_event() {
    let inbound = classify(
        r#"42["message",{"sender_name":"Acme","message":"oi","attachment_filename":null,"attachment_type":null,"timestamp":"2024-01-01 10:30:00"}]"#,
    )
    .expect("message");
    let Inbound::Event(ServerEvent::Message(msg)) = inbound else {
        panic!("expected message event");
    };
    assert_eq!(msg.text(), Some("oi"));
    assert_eq!(msg.footer(), "Acme - 10:30:00");
}

#[test]
fn classify_close_and_noop() {
    assert_eq!(classify("1").expect("close"), Inbound::Closed);
    assert_eq!(classify("6").expect("noop"), Inbound::Ignored);
    assert_eq!(classify("41").expect("disconnect"), Inbound::Disconnected);
}

#[test]
fn classify_surfaces_codec_errors() {
    assert!(classify("").is_err());
    assert!(classify("4").is_err());
    assert!(classify("42not-json").is_err());
}

#[test]
fn connect_frame_targets_default_namespace() {
    assert_eq!(connect_frame(), "40");
}

#[test]
fn websocket_url_maps_schemes() {
    assert_eq!(
        websocket_url("http://127.0.0.1:5000", DEFAULT_SOCKET_PATH).expect("http"),
        "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket"
    );
    assert_eq!(
        websocket_url("https://connecta.example/", "socket.io").expect("https"),
        "wss://connecta.example/socket.io/?EIO=4&transport=websocket"
    );
}

#[test]
fn websocket_url_rejects_other_schemes() {
    assert!(matches!(
        websocket_url("ftp://host", DEFAULT_SOCKET_PATH),
        Err(CodecError::InvalidBaseUrl(_))
    ));
    assert!(websocket_url("http://", DEFAULT_SOCKET_PATH).is_err());
}
