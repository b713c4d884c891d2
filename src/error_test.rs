use super::*;

#[test]
fn remote_error_displays_server_message_verbatim() {
    let err = ClientError::Remote { status: 400, message: "Message is required".to_owned() };
    assert_eq!(err.to_string(), "Message is required");
    assert_eq!(err.status(), Some(400));
}

#[test]
fn transport_error_has_no_status() {
    let err = ClientError::transport("connection refused");
    assert_eq!(err.to_string(), "network error: connection refused");
    assert_eq!(err.status(), None);
}

#[test]
fn validation_error_converts_into_client_error() {
    let err: ClientError = ValidationError::MissingField("name").into();
    assert_eq!(err, ClientError::Validation(ValidationError::MissingField("name")));
    assert_eq!(err.to_string(), "name is required");
}

#[test]
fn file_too_large_mentions_limit() {
    let err = ValidationError::FileTooLarge { size: 20 * 1024 * 1024, max: 16 * 1024 * 1024 };
    assert!(err.to_string().contains("16MB"));
}
