use super::*;
use crate::transport::types::ChatReply;

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, body: body.to_owned() }
}

#[test]
fn error_message_prefers_error_then_message() {
    let both = serde_json::json!({"error": "boom", "message": "ignored"});
    assert_eq!(error_message(&both), Some("boom"));
    let only_message = serde_json::json!({"message": "No file provided"});
    assert_eq!(error_message(&only_message), Some("No file provided"));
    let blank_error = serde_json::json!({"error": "  ", "message": "fallback"});
    assert_eq!(error_message(&blank_error), Some("fallback"));
    assert_eq!(error_message(&serde_json::json!({"detail": "x"})), None);
}

#[test]
fn decode_success_body() {
    let reply: ChatReply = decode(&response(200, r#"{"response":"Hi there"}"#)).unwrap();
    assert_eq!(reply.response, "Hi there");
}

#[test]
fn decode_failure_surfaces_server_error_verbatim() {
    let err = decode::<ChatReply>(&response(500, r#"{"error":"Model not loaded"}"#)).unwrap_err();
    assert_eq!(err, ClientError::Remote { status: 500, message: "Model not loaded".to_owned() });
}

#[test]
fn decode_failure_without_body_uses_generic_message() {
    let err = decode::<ChatReply>(&response(502, "<html>Bad Gateway</html>")).unwrap_err();
    assert_eq!(err.to_string(), "request failed with status 502");
    assert_eq!(err.status(), Some(502));
}

#[test]
fn decode_success_with_wrong_shape_is_malformed() {
    let err = decode::<ChatReply>(&response(200, r#"{"answer":"x"}"#)).unwrap_err();
    assert_eq!(err, ClientError::Remote { status: 200, message: MALFORMED_BODY.to_owned() });
}

#[test]
fn decode_ack_treats_error_key_as_failure() {
    let err = decode_ack(&response(200, r#"{"error":"Project not found"}"#)).unwrap_err();
    assert_eq!(err.to_string(), "Project not found");
    let ok = decode_ack(&response(200, r#"{"message":"deleted"}"#)).unwrap();
    assert_eq!(ok["message"], "deleted");
}
