use super::*;

#[test]
fn style_variables_empty_without_overrides() {
    assert_eq!(style_variables(&StyleOverrides::default()), "");
}

#[test]
fn style_variables_emit_only_set_values() {
    let styles = StyleOverrides {
        primary_color: Some("#ff0000".to_owned()),
        text_color: Some(" white ".to_owned()),
        ..StyleOverrides::default()
    };
    assert_eq!(style_variables(&styles), "--chatbot-primary: #ff0000; --chatbot-text: white;");
}

#[test]
fn style_variables_drop_injection_attempts() {
    let styles = StyleOverrides { background_color: Some("red; display: none".to_owned()), ..StyleOverrides::default() };
    assert_eq!(style_variables(&styles), "");
}

#[test]
fn toggled_flips_theme() {
    assert_eq!(toggled(Theme::Light), Theme::Dark);
    assert_eq!(toggled(Theme::Dark), Theme::Light);
}

#[test]
fn apply_is_noop_but_callable() {
    apply(Theme::Dark);
}
