use super::*;

#[test]
fn counter_class_tracks_level() {
    assert_eq!(counter_class(CharCounter::for_input("hi").level), "chat-panel__counter");
    assert_eq!(
        counter_class(CharCounter::for_input(&"a".repeat(460)).level),
        "chat-panel__counter chat-panel__counter--warning"
    );
    assert_eq!(
        counter_class(CharCounter::for_input(&"a".repeat(490)).level),
        "chat-panel__counter chat-panel__counter--error"
    );
}

#[test]
fn input_placeholder_reflects_connectivity() {
    assert_eq!(input_placeholder(true, "Ask away"), "Ask away");
    assert_eq!(input_placeholder(false, "Ask away"), "Waiting for connection...");
}
