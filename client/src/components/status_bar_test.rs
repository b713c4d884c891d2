use super::*;

#[test]
fn connectivity_class_and_label_match_state() {
    assert_eq!(connectivity_class(ConnectivityState::Online), "status-bar__dot status-bar__dot--connected");
    assert_eq!(connectivity_label(ConnectivityState::Offline), "Disconnected");
}

#[test]
fn knowledge_base_summary_formats_counts() {
    let stats = KnowledgeBaseStats { vector_store_size: 120, total_documents: 4 };
    assert_eq!(knowledge_base_summary(Some(stats)), "4 documents | 120 vectors");
    assert_eq!(knowledge_base_summary(None), "Knowledge base: --");
}
