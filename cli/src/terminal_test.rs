use super::*;

fn output(presenter: TerminalPresenter<Vec<u8>>) -> String {
    String::from_utf8(presenter.into_inner()).unwrap()
}

#[test]
fn interactive_prints_state_changes() {
    let presenter = TerminalPresenter::new(Vec::new(), true);
    presenter.reset_transcript("Hello!");
    presenter.set_connectivity(ConnectivityState::Online);
    presenter.set_typing(true);
    presenter.set_typing(false);
    presenter.notify("Chat cleared", Severity::Info);
    presenter.show_knowledge_base(&KnowledgeBaseStats { vector_store_size: 9, total_documents: 2 });

    let text = output(presenter);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "assistant: Hello!",
            "-- connected",
            "-- assistant is typing...",
            "[info] Chat cleared",
            "-- knowledge base: 2 documents, 9 vectors",
        ]
    );
}

#[test]
fn user_messages_are_not_echoed() {
    let presenter = TerminalPresenter::new(Vec::new(), true);
    presenter.render_message(&Message::user("hi"));
    assert_eq!(output(presenter), "");
}

#[test]
fn assistant_messages_carry_time_when_interactive() {
    let presenter = TerminalPresenter::new(Vec::new(), true);
    presenter.render_message(&Message::assistant("Hi there"));
    let text = output(presenter);
    assert!(text.starts_with('['));
    assert!(text.trim_end().ends_with("] assistant: Hi there"));
}

#[test]
fn one_shot_prints_only_replies_and_errors() {
    let presenter = TerminalPresenter::new(Vec::new(), false);
    presenter.reset_transcript("Hello!");
    presenter.set_connectivity(ConnectivityState::Offline);
    presenter.notify("Connection to the server lost", Severity::Warning);
    presenter.render_message(&Message::assistant("42"));
    presenter.notify("network error: refused", Severity::Error);

    assert_eq!(output(presenter), "42\n[error] network error: refused\n");
}
