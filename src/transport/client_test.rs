use super::*;
use crate::config::Config;
use crate::test_support::MockBackend;

fn client() -> TransportClient<MockBackend> {
    TransportClient::new(MockBackend::new(), ConfigHandle::new(Config::default()))
}

#[test]
fn endpoint_joins_without_double_slashes() {
    assert_eq!(endpoint("/api", "status"), "/api/status");
    assert_eq!(endpoint("http://127.0.0.1:5000/api/", "/chat"), "http://127.0.0.1:5000/api/chat");
}

#[test]
fn unencodable_body_is_a_validation_error() {
    let body: std::collections::BTreeMap<Vec<u8>, u8> = [(vec![1], 1)].into_iter().collect();
    let err = json_body(&body).unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::Unencodable(_))), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn send_chat_message_posts_text_and_session_id() {
    let client = client();
    client.backend().ok_json("chat", &serde_json::json!({"response": "Hi there"}));

    let reply = client.send_chat_message("Hello", "s-1").await.unwrap();
    assert_eq!(reply, "Hi there");

    let requests = client.backend().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "/api/chat");
    assert_eq!(
        requests[0].body,
        RequestBody::Json(serde_json::json!({"message": "Hello", "session_id": "s-1"}))
    );
}

#[tokio::test]
async fn transport_failure_passes_through() {
    let client = client();
    client.backend().fail("status", "connection refused");
    let err = client.get_status().await.unwrap_err();
    assert_eq!(err, ClientError::Transport("connection refused".to_owned()));
}

#[tokio::test]
async fn non_success_status_is_remote_error() {
    let client = client();
    client.backend().respond("status", 503, r#"{"message":"warming up"}"#);
    let err = client.get_status().await.unwrap_err();
    assert_eq!(err, ClientError::Remote { status: 503, message: "warming up".to_owned() });
}

#[tokio::test]
async fn requests_follow_config_changes() {
    let handle = ConfigHandle::new(Config::default());
    let client = TransportClient::new(MockBackend::new(), handle.clone());
    client.backend().ok_json("knowledge_base", &serde_json::json!({"vector_store_size": 3, "total_documents": 1}));
    client.backend().ok_json("knowledge_base", &serde_json::json!({}));

    let stats = client.get_knowledge_base_stats().await.unwrap();
    assert_eq!(stats, KnowledgeBaseStats { vector_store_size: 3, total_documents: 1 });

    handle.replace(Config { api_base: "https://bot.example/v2".to_owned(), ..Config::default() });
    let stats = client.get_knowledge_base_stats().await.unwrap();
    assert_eq!(stats, KnowledgeBaseStats::default());
    assert_eq!(client.backend().requests()[1].url, "https://bot.example/v2/knowledge_base");
}

#[tokio::test]
async fn oversized_upload_never_reaches_backend() {
    let client = client();
    let doc = Document::new("scan.pdf", vec![0; 20 * 1024 * 1024]);
    let err = client.upload_document(doc).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(ValidationError::FileTooLarge { .. })));
    assert!(client.backend().requests().is_empty());
}

#[tokio::test]
async fn upload_sends_multipart_document() {
    let client = client();
    client.backend().ok_json("upload_document", &serde_json::json!({"message": "ok", "filename": "a.txt"}));
    let ack = client.upload_document(Document::new("a.txt", b"hello".to_vec())).await.unwrap();
    assert_eq!(ack.filename.as_deref(), Some("a.txt"));
    assert!(matches!(&client.backend().requests()[0].body, RequestBody::Multipart(d) if d.file_name == "a.txt"));
}

#[tokio::test]
async fn project_calls_use_expected_routes() {
    let client = client();
    let backend = client.backend();
    backend.ok_json("projects", &serde_json::json!({"projects": [{"id": "p1", "name": "Docs", "url": "https://docs.example", "status": "ready"}]}));
    backend.ok_json("projects", &serde_json::json!({"id": "p2", "name": "Blog", "url": "https://blog.example"}));
    backend.ok_json("projects/p2", &serde_json::json!({"message": "deleted"}));
    backend.ok_json("projects/p1/scrape", &serde_json::json!({"error": "already scraping"}));

    let projects = client.list_projects().await.unwrap();
    assert_eq!(projects[0].status, ProjectStatus::Ready);

    let created = client
        .create_project(&NewProject { name: "Blog".to_owned(), url: "https://blog.example".to_owned() })
        .await
        .unwrap();
    assert_eq!(created.id, "p2");

    client.delete_project("p2").await.unwrap();
    let err = client.trigger_scrape("p1").await.unwrap_err();
    assert_eq!(err.to_string(), "already scraping");

    let methods: Vec<(Method, String)> = backend.requests().into_iter().map(|r| (r.method, r.url)).collect();
    assert_eq!(
        methods,
        vec![
            (Method::Get, "/api/projects".to_owned()),
            (Method::Post, "/api/projects".to_owned()),
            (Method::Delete, "/api/projects/p2".to_owned()),
            (Method::Post, "/api/projects/p1/scrape".to_owned()),
        ]
    );
}

#[tokio::test]
async fn blank_project_id_is_rejected_locally() {
    let client = client();
    assert!(matches!(client.delete_project(" ").await, Err(ClientError::Validation(_))));
    assert!(client.backend().requests().is_empty());
}
