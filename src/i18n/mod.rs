//! Internationalization (i18n) module.
//!
//! Texts live in embedded JSON files keyed by language code.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Value;

/// Language used when none is requested.
pub const DEFAULT_LANG: &str = "en";

/// Global translation store: LangCode -> Key -> Text
static TRANSLATIONS: OnceLock<HashMap<String, Value>> = OnceLock::new();

fn load() -> HashMap<String, Value> {
    let mut map = HashMap::new();

    match serde_json::from_str(include_str!("en.json")) {
        Ok(val) => {
            map.insert("en".to_string(), val);
        }
        Err(e) => tracing::error!("Failed to parse en.json: {}", e),
    }

    map
}

/// Load translations eagerly. Lookups also load them on first use.
pub fn init() {
    TRANSLATIONS.get_or_init(load);
}

/// Get text for a key in a specific language.
/// Supports nested keys via dot notation, e.g., "afk.notice".
pub fn get_text(lang: &str, key: &str) -> String {
    let store = TRANSLATIONS.get_or_init(load);

    if let Some(text) = store.get(lang).and_then(|val| resolve_key(val, key)) {
        return text;
    }

    if lang != DEFAULT_LANG
        && let Some(text) = store.get(DEFAULT_LANG).and_then(|val| resolve_key(val, key))
    {
        return text;
    }

    // Key not found
    key.to_string()
}

/// Get text in the default language.
pub fn t(key: &str) -> String {
    get_text(DEFAULT_LANG, key)
}

fn resolve_key(val: &Value, key: &str) -> Option<String> {
    let mut current = val;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    current.as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        assert!(t("afk.notice").contains("{reason}"));
        assert!(t("afk.summary").contains("{messages}"));
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(t("afk.nope"), "afk.nope");
        assert_eq!(get_text("xx", "afk.nope"), "afk.nope");
    }

    #[test]
    fn test_unknown_lang_falls_back_to_english() {
        assert_eq!(get_text("xx", "afk.template_none"), t("afk.template_none"));
    }
}
