//! Client Configuration
//!
//! Read once at startup from an optional JSON block in the host page:
//!
//! ```html
//! <script id="listly-config" type="application/json">
//!   { "api_base": "https://listly.example", "search_debounce_ms": 300 }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

pub const CONFIG_ELEMENT_ID: &str = "listly-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute origin of the REST backend; empty means "same origin as the page"
    pub api_base: String,
    pub search_debounce_ms: u32,
    /// How long a notification stays on screen
    pub toast_ms: u32,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            search_debounce_ms: 250,
            toast_ms: 2200,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a config block; `origin` fills in a missing `api_base`.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.with_origin(origin))
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        if self.api_base.trim().is_empty() {
            self.api_base = origin.to_string();
        }
        self
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    /// Load from the host page, falling back to defaults.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let origin = window.location().origin().unwrap_or_default();
        let text = window
            .document()
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(text) => Self::from_json(&text, &origin).unwrap_or_else(|e| {
                log::warn!("[config] ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default().with_origin(&origin)
            }),
            None => Self::default().with_origin(&origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ClientConfig::from_json(r#"{ "search_debounce_ms": 400 }"#, "http://localhost:8080").unwrap();
        assert_eq!(config.search_debounce_ms, 400);
        assert_eq!(config.toast_ms, 2200);
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_explicit_api_base_wins() {
        let config = ClientConfig::from_json(
            r#"{ "api_base": "https://api.example", "log_level": "debug" }"#,
            "http://localhost:8080",
        )
        .unwrap();
        assert_eq!(config.api_base, "https://api.example");
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(ClientConfig::from_json("{ nope", "http://x").is_err());
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = ClientConfig {
            log_level: "loud".into(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }
}
