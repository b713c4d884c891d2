//! Theme and color overrides for the chat surfaces.
//!
//! The theme is applied as a `data-theme` attribute; host color overrides
//! become CSS custom properties on the widget root so stylesheets can read
//! them with `var(--chatbot-primary)` and friends.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use chatbot::config::{StyleOverrides, Theme};

/// Inline `style` declarations for the given overrides. Empty when none are set.
pub fn style_variables(styles: &StyleOverrides) -> String {
    [
        ("--chatbot-primary", &styles.primary_color),
        ("--chatbot-background", &styles.background_color),
        ("--chatbot-text", &styles.text_color),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        let value = value.as_deref()?.trim();
        // Reject anything that could close the declaration.
        (!value.is_empty() && !value.contains([';', '{', '}'])).then(|| format!("{name}: {value};"))
    })
    .collect::<Vec<_>>()
    .join(" ")
}

/// Apply `theme` to the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let _ = el.set_attribute("data-theme", theme.as_str());
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

/// The other theme.
pub fn toggled(theme: Theme) -> Theme {
    match theme {
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::Light,
    }
}
