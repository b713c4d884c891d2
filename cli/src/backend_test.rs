use super::*;

#[test]
fn reqwest_method_maps_every_verb() {
    assert_eq!(reqwest_method(Method::Get), reqwest::Method::GET);
    assert_eq!(reqwest_method(Method::Post), reqwest::Method::POST);
    assert_eq!(reqwest_method(Method::Delete), reqwest::Method::DELETE);
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let backend = ReqwestBackend::new(Duration::from_secs(2)).unwrap();
    let request = HttpRequest {
        method: Method::Get,
        url: "http://127.0.0.1:1/api/status".to_owned(),
        body: RequestBody::Empty,
    };
    let err = backend.execute(request).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
