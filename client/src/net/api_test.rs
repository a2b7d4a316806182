use super::*;

#[test]
fn stored_upload_is_returned_regardless_of_status() {
    let body = UploadResponse::Stored {
        filename: "x.png".to_owned(),
    };
    assert_eq!(interpret_upload(200, Some(body.clone())).expect("stored"), body);
}

#[test]
fn rejection_with_client_error_status_is_an_application_error() {
    let body = UploadResponse::Rejected {
        error: "file type not allowed".to_owned(),
    };
    assert_eq!(interpret_upload(400, Some(body.clone())).expect("rejected"), body);
}

#[test]
fn unparseable_success_body_is_decode_error() {
    assert!(matches!(interpret_upload(200, None), Err(ClientError::Decode(_))));
}

#[test]
fn unparseable_failure_body_reports_status() {
    assert!(matches!(interpret_upload(502, None), Err(ClientError::Status(502))));
}

#[test]
fn endpoint_constants_match_server_contract() {
    assert_eq!(UPLOAD_FIELD, "file");
    assert_eq!(QUERY_PARAM, "query");
}

#[test]
fn two_character_query_targets_autocomplete_endpoint() {
    assert_eq!(
        autocomplete_request_url("/autocomplete_search", "ab"),
        "/autocomplete_search?query=ab"
    );
}

#[test]
fn query_value_is_percent_encoded() {
    assert_eq!(
        autocomplete_request_url("/autocomplete_search", "a&b c"),
        "/autocomplete_search?query=a%26b%20c"
    );
    assert_eq!(
        autocomplete_request_url("/autocomplete_search", "café"),
        "/autocomplete_search?query=caf%C3%A9"
    );
}

#[test]
fn endpoint_with_existing_query_gets_extra_parameter() {
    assert_eq!(
        autocomplete_request_url("/autocomplete_search?scope=all", "ab"),
        "/autocomplete_search?scope=all&query=ab"
    );
}

#[cfg(not(feature = "csr"))]
#[test]
fn autocomplete_is_unavailable_natively() {
    let result = futures::executor::block_on(autocomplete_search("/autocomplete_search", "ab"));
    assert!(matches!(result, Err(ClientError::Unavailable)));
}
