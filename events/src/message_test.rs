use super::*;

fn message(sender: &str, text: Option<&str>, attachment: Option<(&str, &str)>, timestamp: &str) -> ChatMessage {
    ChatMessage {
        sender_name: sender.to_owned(),
        message: text.map(ToOwned::to_owned),
        attachment_filename: attachment.map(|(name, _)| name.to_owned()),
        attachment_type: attachment.map(|(_, kind)| kind.to_owned()),
        timestamp: timestamp.to_owned(),
    }
}

#[test]
fn display_time_takes_part_after_first_space() {
    assert_eq!(display_time("2024-01-01 10:30:00"), "10:30:00");
}

#[test]
fn display_time_falls_back_to_full_timestamp() {
    assert_eq!(display_time("10:30"), "10:30");
    assert_eq!(display_time("2024-01-01 "), "2024-01-01 ");
    assert_eq!(display_time(""), "");
}

#[test]
fn footer_joins_sender_and_time() {
    let msg = message("Acme", Some("hi"), None, "2024-01-01 10:30:00");
    assert_eq!(msg.footer(), "Acme - 10:30:00");
}

#[test]
fn image_detection_needs_filename_and_type() {
    assert!(message("A", None, Some(("x.png", "image")), "").has_image());
    assert!(!message("A", None, Some(("x.pdf", "file")), "").has_image());
    assert!(!message("A", None, None, "").has_image());
}

#[test]
fn empty_strings_count_as_absent() {
    let msg = message("A", Some(""), Some(("", "image")), "");
    assert_eq!(msg.text(), None);
    assert_eq!(msg.attachment(), None);
    assert!(!msg.has_image());
}

#[test]
fn is_from_compares_exact_name() {
    let msg = message("Acme", Some("hi"), None, "");
    assert!(msg.is_from("Acme"));
    assert!(!msg.is_from("acme"));
}

#[test]
fn attachment_path_joins_without_double_slash() {
    assert_eq!(attachment_path("/uploads/chat", "x.png"), "/uploads/chat/x.png");
    assert_eq!(attachment_path("/uploads/chat/", "x.png"), "/uploads/chat/x.png");
}

#[test]
fn upload_response_distinguishes_success_and_rejection() {
    let stored: UploadResponse = serde_json::from_str(r#"{"filename":"x.png"}"#).expect("stored");
    let rejected: UploadResponse = serde_json::from_str(r#"{"error":"Tipo de arquivo"}"#).expect("rejected");
    assert_eq!(stored, UploadResponse::Stored { filename: "x.png".to_owned() });
    assert_eq!(rejected, UploadResponse::Rejected { error: "Tipo de arquivo".to_owned() });
    assert!(serde_json::from_str::<UploadResponse>(r#"{"ok":true}"#).is_err());
}
