use super::*;

#[test]
fn status_report_tolerates_sparse_body() {
    let report: StatusReport = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
    assert_eq!(report.status.as_deref(), Some("healthy"));
    assert_eq!(report.vector_store_size, None);
    assert!(report.supported_formats.is_empty());
}

#[test]
fn status_report_exposes_counts_as_knowledge_base_stats() {
    let report: StatusReport = serde_json::from_str(r#"{"status":"healthy","total_documents":7}"#).unwrap();
    assert_eq!(report.knowledge_base(), Some(KnowledgeBaseStats { vector_store_size: 0, total_documents: 7 }));

    let bare: StatusReport = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
    assert_eq!(bare.knowledge_base(), None);
}

#[test]
fn knowledge_base_stats_default_missing_counts_to_zero() {
    let stats: KnowledgeBaseStats = serde_json::from_str(r#"{"total_documents":7}"#).unwrap();
    assert_eq!(stats, KnowledgeBaseStats { vector_store_size: 0, total_documents: 7 });
}

#[test]
fn chat_request_uses_snake_case_session_field() {
    let req = ChatRequest { message: "Hello".to_owned(), session_id: "s-1".to_owned() };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json, serde_json::json!({"message": "Hello", "session_id": "s-1"}));
}

#[test]
fn project_status_known_and_unknown_values() {
    let raw = r#"[
        {"id":"1","name":"a","url":"https://a.example","status":"scraping_failed"},
        {"id":"2","name":"b","url":"https://b.example","status":"archived"},
        {"id":"3","name":"c","url":"https://c.example"}
    ]"#;
    let projects: Vec<Project> = serde_json::from_str(raw).unwrap();
    assert_eq!(projects[0].status, ProjectStatus::ScrapingFailed);
    assert_eq!(projects[1].status, ProjectStatus::Other);
    assert_eq!(projects[2].status, ProjectStatus::Created);
    assert!(projects[2].created_at.is_none());
}

#[test]
fn project_status_scrape_gate() {
    assert!(ProjectStatus::Created.can_scrape());
    assert!(ProjectStatus::ScrapingFailed.can_scrape());
    assert!(!ProjectStatus::Scraping.can_scrape());
    assert!(!ProjectStatus::Training.can_scrape());
    assert_eq!(ProjectStatus::ScrapingFailed.as_str(), "scraping_failed");
}

#[test]
fn project_list_defaults_to_empty() {
    let list: ProjectList = serde_json::from_str("{}").unwrap();
    assert!(list.projects.is_empty());
}

#[test]
fn created_project_accepts_wrapped_and_bare_records() {
    let wrapped: CreatedProject =
        serde_json::from_str(r#"{"status":"success","project":{"id":"p1","name":"a","url":"https://a.example"}}"#)
            .unwrap();
    let bare: CreatedProject = serde_json::from_str(r#"{"id":"p1","name":"a","url":"https://a.example"}"#).unwrap();
    assert_eq!(wrapped.into_project(), bare.into_project());
}
