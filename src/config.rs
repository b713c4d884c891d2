//! User-configurable settings and their persistence.
//!
//! DESIGN
//! ======
//! [`ConfigStore`] owns the current [`Config`]; every other component reads
//! it through a [`ConfigHandle`], so a save is visible to the next request
//! without re-wiring anything. Requests already in flight keep the URL they
//! were built with.
//!
//! ERROR HANDLING
//! ==============
//! Loading never fails. Each persisted field is decoded on its own and falls
//! back to its default when missing or invalid; an unreadable blob yields
//! the full defaults and a warning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::{KvStore, StoreError};

/// Storage key for persisted settings.
pub const CONFIG_STORAGE_KEY: &str = "chatbot_settings";
pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_MAX_RESULTS: u32 = 5;
pub const DEFAULT_TITLE: &str = "AI Assistant";
pub const DEFAULT_WELCOME_TEXT: &str = "Hello! How can I help you?";
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Type your question...";

/// Color scheme of the chat surfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Screen corner the widget docks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

/// Host-supplied color overrides for the widget.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl StyleOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none() && self.background_color.is_none() && self.text_color.is_none()
    }

    /// Field-wise merge: values present in `other` win.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            primary_color: other.primary_color.clone().or_else(|| self.primary_color.clone()),
            background_color: other.background_color.clone().or_else(|| self.background_color.clone()),
            text_color: other.text_color.clone().or_else(|| self.text_color.clone()),
        }
    }
}

/// Effective client settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base path or URL prefixed to every endpoint.
    pub api_base: String,
    /// Number of knowledge-base results the assistant should consider. Always ≥ 1.
    pub max_results: u32,
    pub theme: Theme,
    pub position: Position,
    pub title: String,
    pub welcome_text: String,
    pub placeholder_text: String,
    pub custom_styles: StyleOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            max_results: DEFAULT_MAX_RESULTS,
            theme: Theme::default(),
            position: Position::default(),
            title: DEFAULT_TITLE.to_owned(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_owned(),
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_owned(),
            custom_styles: StyleOverrides::default(),
        }
    }
}

impl Config {
    /// Decode a persisted blob, defaulting each missing or invalid field.
    ///
    /// # Errors
    ///
    /// Returns the JSON error only when `raw` is not a JSON document at all.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }

    /// Field-wise lenient decode. Non-object values yield the defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(obj) = value.as_object() else {
            return defaults;
        };
        Self {
            api_base: pick(obj, &["apiBase", "apiUrl"]).unwrap_or(defaults.api_base),
            max_results: pick(obj, &["maxResults", "maxDocs"]).unwrap_or(defaults.max_results),
            theme: pick(obj, &["theme"]).unwrap_or(defaults.theme),
            position: pick(obj, &["position"]).unwrap_or(defaults.position),
            title: pick(obj, &["title"]).unwrap_or(defaults.title),
            welcome_text: pick(obj, &["welcomeText", "welcomeMessage"]).unwrap_or(defaults.welcome_text),
            placeholder_text: pick(obj, &["placeholderText", "placeholder"]).unwrap_or(defaults.placeholder_text),
            custom_styles: pick(obj, &["customStyles", "customStyleOverrides"]).unwrap_or(defaults.custom_styles),
        }
        .normalized()
    }

    /// Apply `patch` over this config.
    #[must_use]
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        let mut next = self.clone();
        if let Some(api_base) = &patch.api_base {
            next.api_base.clone_from(api_base);
        }
        if let Some(max_results) = patch.max_results {
            next.max_results = max_results;
        }
        if let Some(theme) = patch.theme {
            next.theme = theme;
        }
        if let Some(position) = patch.position {
            next.position = position;
        }
        if let Some(title) = &patch.title {
            next.title.clone_from(title);
        }
        if let Some(welcome_text) = &patch.welcome_text {
            next.welcome_text.clone_from(welcome_text);
        }
        if let Some(placeholder_text) = &patch.placeholder_text {
            next.placeholder_text.clone_from(placeholder_text);
        }
        if let Some(styles) = &patch.custom_styles {
            next.custom_styles = next.custom_styles.merged(styles);
        }
        next.normalized()
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base.trim();
        self.api_base = if trimmed.is_empty() { DEFAULT_API_BASE.to_owned() } else { trimmed.to_owned() };
        if self.max_results == 0 {
            self.max_results = DEFAULT_MAX_RESULTS;
        }
        self
    }
}

fn pick<T: DeserializeOwned>(obj: &Map<String, Value>, keys: &[&str]) -> Option<T> {
    let value = keys.iter().find_map(|key| obj.get(*key))?;
    serde_json::from_value(value.clone()).ok()
}

/// Partial settings update. `None` fields are left untouched.
///
/// Accepts the field names the embedding snippet has always used
/// (`apiUrl`, `welcomeMessage`, `placeholder`, `customStyles`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    #[serde(alias = "apiUrl", skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(alias = "maxDocs", skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(alias = "welcomeMessage", skip_serializing_if = "Option::is_none")]
    pub welcome_text: Option<String>,
    #[serde(alias = "placeholder", skip_serializing_if = "Option::is_none")]
    pub placeholder_text: Option<String>,
    #[serde(alias = "customStyleOverrides", skip_serializing_if = "Option::is_none")]
    pub custom_styles: Option<StyleOverrides>,
}

/// Cheap, read-only view of the current [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigHandle(Rc<RefCell<Config>>);

impl ConfigHandle {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self(Rc::new(RefCell::new(config)))
    }

    #[must_use]
    pub fn get(&self) -> Config {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn api_base(&self) -> String {
        self.0.borrow().api_base.clone()
    }

    pub(crate) fn replace(&self, config: Config) {
        *self.0.borrow_mut() = config;
    }
}

/// Owner of the settings; the only writer.
pub struct ConfigStore<S> {
    store: S,
    current: ConfigHandle,
}

impl<S: KvStore> ConfigStore<S> {
    /// Read persisted settings from `store`, applying defaults where needed.
    pub fn load(store: S) -> Self {
        let config = match store.get(CONFIG_STORAGE_KEY) {
            Ok(Some(raw)) => Config::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored settings are corrupt; using defaults");
                Config::default()
            }),
            Ok(None) => Config::default(),
            Err(e) => {
                tracing::warn!(error = %e, "settings storage unreadable; using defaults");
                Config::default()
            }
        };
        tracing::debug!(api_base = %config.api_base, max_results = config.max_results, "settings loaded");
        Self { store, current: ConfigHandle::new(config) }
    }

    #[must_use]
    pub fn current(&self) -> Config {
        self.current.get()
    }

    #[must_use]
    pub fn handle(&self) -> ConfigHandle {
        self.current.clone()
    }

    /// Merge `patch` over the current settings and persist the result.
    ///
    /// The merged settings take effect immediately, even when persisting
    /// them fails.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the settings could not be written.
    pub fn save(&self, patch: &ConfigPatch) -> Result<Config, StoreError> {
        let next = self.apply(patch);
        let raw = serde_json::to_string(&next).map_err(|e| StoreError::Write(e.to_string()))?;
        self.store.set(CONFIG_STORAGE_KEY, &raw)?;
        tracing::info!(api_base = %next.api_base, "settings saved");
        Ok(next)
    }

    /// Merge `patch` for this process only, without persisting it.
    pub fn apply(&self, patch: &ConfigPatch) -> Config {
        let next = self.current.get().merged(patch);
        self.current.replace(next.clone());
        next
    }
}
