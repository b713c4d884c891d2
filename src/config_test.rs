use super::*;
use crate::store::MemoryStore;

/// Store whose writes always fail.
struct ReadOnlyStore;

impl KvStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write("quota exceeded".to_owned()))
    }
}

// =============================================================
// load
// =============================================================

#[test]
fn load_without_stored_settings_uses_defaults() {
    let store = ConfigStore::load(MemoryStore::new());
    assert_eq!(store.current(), Config::default());
    assert_eq!(store.current().api_base, "/api");
    assert_eq!(store.current().max_results, 5);
}

#[test]
fn load_corrupt_blob_falls_back_to_defaults() {
    let store = ConfigStore::load(MemoryStore::with_entry(CONFIG_STORAGE_KEY, "{not json"));
    assert_eq!(store.current(), Config::default());
}

#[test]
fn load_defaults_invalid_fields_individually() {
    let raw = r#"{"apiBase":"https://bot.example/api","maxResults":0,"theme":"purple","title":42}"#;
    let store = ConfigStore::load(MemoryStore::with_entry(CONFIG_STORAGE_KEY, raw));
    let config = store.current();
    assert_eq!(config.api_base, "https://bot.example/api");
    assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.title, DEFAULT_TITLE);
}

#[test]
fn load_accepts_legacy_field_names() {
    let raw = r#"{"apiUrl":"/legacy","maxDocs":9}"#;
    let config = Config::from_json(raw).unwrap();
    assert_eq!(config.api_base, "/legacy");
    assert_eq!(config.max_results, 9);
}

#[test]
fn load_blank_api_base_uses_default() {
    let config = Config::from_json(r#"{"apiBase":"   "}"#).unwrap();
    assert_eq!(config.api_base, DEFAULT_API_BASE);
}

#[test]
fn from_value_non_object_yields_defaults() {
    assert_eq!(Config::from_value(&serde_json::json!([1, 2])), Config::default());
}

// =============================================================
// save / apply
// =============================================================

#[test]
fn save_merges_and_persists() {
    let store = ConfigStore::load(std::rc::Rc::new(MemoryStore::new()));
    let patch = ConfigPatch { api_base: Some("http://localhost:5000/api".to_owned()), ..ConfigPatch::default() };
    let saved = store.save(&patch).unwrap();
    assert_eq!(saved.api_base, "http://localhost:5000/api");
    assert_eq!(saved.max_results, DEFAULT_MAX_RESULTS);

    let raw = store.store.get(CONFIG_STORAGE_KEY).unwrap().unwrap();
    let reloaded = Config::from_json(&raw).unwrap();
    assert_eq!(reloaded, saved);
}

#[test]
fn save_is_visible_through_existing_handle() {
    let store = ConfigStore::load(MemoryStore::new());
    let handle = store.handle();
    store
        .save(&ConfigPatch { api_base: Some("/v2".to_owned()), ..ConfigPatch::default() })
        .unwrap();
    assert_eq!(handle.api_base(), "/v2");
}

#[test]
fn save_failure_still_applies_in_memory() {
    let store = ConfigStore::load(ReadOnlyStore);
    let err = store
        .save(&ConfigPatch { max_results: Some(3), ..ConfigPatch::default() })
        .unwrap_err();
    assert_eq!(err, StoreError::Write("quota exceeded".to_owned()));
    assert_eq!(store.current().max_results, 3);
}

#[test]
fn save_zero_max_results_normalizes_to_default() {
    let store = ConfigStore::load(MemoryStore::new());
    let saved = store
        .save(&ConfigPatch { max_results: Some(0), ..ConfigPatch::default() })
        .unwrap();
    assert_eq!(saved.max_results, DEFAULT_MAX_RESULTS);
}

#[test]
fn apply_does_not_persist() {
    let store = ConfigStore::load(std::rc::Rc::new(MemoryStore::new()));
    store.apply(&ConfigPatch { title: Some("Museum guide".to_owned()), ..ConfigPatch::default() });
    assert_eq!(store.current().title, "Museum guide");
    assert_eq!(store.store.get(CONFIG_STORAGE_KEY).unwrap(), None);
}

// =============================================================
// ConfigPatch
// =============================================================

#[test]
fn patch_decodes_embedding_options() {
    let raw = r##"{
        "containerId": "chat",
        "apiUrl": "https://bot.example/api",
        "theme": "dark",
        "position": "bottom-left",
        "welcomeMessage": "Hi!",
        "placeholder": "Ask...",
        "customStyles": {"primaryColor": "#ff0000"}
    }"##;
    let patch: ConfigPatch = serde_json::from_str(raw).unwrap();
    let config = Config::default().merged(&patch);
    assert_eq!(config.api_base, "https://bot.example/api");
    assert_eq!(config.theme, Theme::Dark);
    assert_eq!(config.position, Position::BottomLeft);
    assert_eq!(config.welcome_text, "Hi!");
    assert_eq!(config.placeholder_text, "Ask...");
    assert_eq!(config.custom_styles.primary_color.as_deref(), Some("#ff0000"));
}

#[test]
fn style_overrides_merge_field_wise() {
    let base = StyleOverrides { primary_color: Some("#111".to_owned()), text_color: Some("#222".to_owned()), ..StyleOverrides::default() };
    let patch = StyleOverrides { text_color: Some("#333".to_owned()), ..StyleOverrides::default() };
    let merged = base.merged(&patch);
    assert_eq!(merged.primary_color.as_deref(), Some("#111"));
    assert_eq!(merged.text_color.as_deref(), Some("#333"));
    assert!(merged.background_color.is_none());
    assert!(!merged.is_empty());
}
