use super::*;

fn message(sender: &str, text: Option<&str>, attachment: Option<&str>) -> ChatMessage {
    ChatMessage {
        sender_name: sender.to_owned(),
        message: text.map(ToOwned::to_owned),
        attachment_filename: attachment.map(ToOwned::to_owned),
        attachment_type: None,
        timestamp: "2024-01-01 10:30:00".to_owned(),
    }
}

#[test]
fn session_cookie_uses_flask_cookie_name() {
    assert_eq!(session_cookie("abc.def"), "session=abc.def");
}

#[test]
fn ws_request_sets_session_cookie() {
    let request = ws_request("ws://localhost:5000/socket.io/?EIO=4&transport=websocket", Some("abc")).expect("request");
    assert_eq!(request.headers().get(COOKIE).and_then(|v| v.to_str().ok()), Some("session=abc"));

    let anonymous = ws_request("ws://localhost:5000/socket.io/?EIO=4&transport=websocket", None).expect("request");
    assert!(anonymous.headers().get(COOKIE).is_none());
}

#[test]
fn malformed_session_cookie_is_an_invalid_header() {
    let err = ws_request("ws://localhost:5000/socket.io/", Some("abc\nX-Injected: 1")).expect_err("newline in cookie");
    assert!(matches!(err, CliError::InvalidHeader(_)), "got {err:?}");
}

#[test]
fn render_message_marks_own_messages_as_sent() {
    let msg = message("Acme", Some("hello"), None);
    assert_eq!(render_message(&msg, Some("Acme")), "[sent] Acme - 10:30:00: hello");
    assert_eq!(render_message(&msg, Some("Other")), "[received] Acme - 10:30:00: hello");
    assert_eq!(render_message(&msg, None), "[received] Acme - 10:30:00: hello");
}

#[test]
fn render_message_appends_attachment_path() {
    let msg = message("Acme", None, Some("x.png"));
    assert_eq!(
        render_message(&msg, None),
        "[received] Acme - 10:30:00:  [attachment /uploads/chat/x.png]"
    );
}

#[test]
fn own_typing_is_not_rendered() {
    let typing = ServerEvent::UserTyping {
        sender_name: "Acme".to_owned(),
    };
    assert_eq!(render_typing(&typing, Some("Acme")), None);
    assert_eq!(render_typing(&typing, Some("Other")), Some("Acme is typing...".to_owned()));
    assert!(render_typing(&ServerEvent::UserStoppedTyping, None).is_some());
    assert_eq!(render_typing(&ServerEvent::NewNotification { unread_count: 1 }, None), None);
}

#[test]
fn echo_matches_text_or_attachment() {
    let text = message("Acme", Some("hello"), None);
    let file = message("Acme", None, Some("x.png"));
    assert!(is_echo(&text, Some("hello"), None));
    assert!(!is_echo(&text, Some("bye"), None));
    assert!(is_echo(&file, None, Some("x.png")));
    assert!(!is_echo(&text, None, Some("x.png")));
    assert!(!is_echo(&text, None, None));
}

#[test]
fn send_requires_exactly_one_payload() {
    let parsed = Cli::try_parse_from(["connecta-cli", "room", "send", "--quote-id", "7", "--message", "hi"]);
    assert!(parsed.is_ok());

    let neither = Cli::try_parse_from(["connecta-cli", "room", "send", "--quote-id", "7"]);
    assert!(neither.is_err());

    let both = Cli::try_parse_from([
        "connecta-cli",
        "room",
        "send",
        "--quote-id",
        "7",
        "--message",
        "hi",
        "--attach",
        "x.png",
    ]);
    assert!(both.is_err());
}

#[test]
fn watch_accepts_company_name() {
    let cli = Cli::try_parse_from(["connecta-cli", "room", "watch", "--quote-id", "7", "--as", "Acme"]).expect("parse");
    let Command::Room(RoomCommand {
        command: RoomSubcommand::Watch { quote_id, as_name },
    }) = cli.command
    else {
        panic!("expected room watch");
    };
    assert_eq!(quote_id, "7");
    assert_eq!(as_name.as_deref(), Some("Acme"));
    assert_eq!(cli.socket_path, "/socket.io/");
}
