use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Enhancement service settings, suitable for config files and GUI presets.
/// The API key is read from the environment and never written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Base URL of the generative language API
    pub endpoint: String,
    /// Image-capable model name
    pub model: String,
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Request timeout in seconds; None waits for the service indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl EnhanceConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().with_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup: `API_KEY` (or `GEMINI_API_KEY`),
    /// `PIXELENHANCE_MODEL`, `PIXELENHANCE_ENDPOINT`. Empty values are ignored.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("API_KEY").or_else(|| get("GEMINI_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = get("PIXELENHANCE_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = get("PIXELENHANCE_ENDPOINT") {
            self.endpoint = endpoint;
        }
        self
    }

    /// Load a JSON preset. Leading `//` comment lines are skipped, so files
    /// saved by the GUI load back unchanged. The API key is kept from `self`.
    pub fn merge_file(self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        self.merge_json(&content)
    }

    pub fn merge_json(self, content: &str) -> Result<Self> {
        let json: String = content
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");
        let mut loaded: EnhanceConfig = serde_json::from_str(&json)?;
        loaded.api_key = self.api_key;
        Ok(loaded)
    }

    /// `models/{model}:generateContent` under the configured endpoint.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_gemini_image_model() {
        let config = EnhanceConfig::default();
        assert_eq!(
            config.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
        assert!(config.api_key.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = EnhanceConfig::default().with_lookup(lookup(&[
            ("GEMINI_API_KEY", "fallback"),
            ("PIXELENHANCE_MODEL", "other-model"),
            ("PIXELENHANCE_ENDPOINT", "http://localhost:8080/"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("fallback"));
        assert_eq!(
            config.generate_url(),
            "http://localhost:8080/v1beta/models/other-model:generateContent"
        );

        let config = EnhanceConfig::default()
            .with_lookup(lookup(&[("API_KEY", "primary"), ("GEMINI_API_KEY", "fallback")]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = EnhanceConfig::default().with_lookup(lookup(&[("API_KEY", "  ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = EnhanceConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn preset_with_comment_header_merges() {
        let base = EnhanceConfig {
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        let preset = "// PIXELENHANCE preset\n// Generated: now\n{\"model\": \"m2\", \"timeout_secs\": 90}";
        let merged = base.merge_json(preset).unwrap();
        assert_eq!(merged.model, "m2");
        assert_eq!(merged.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(merged.timeout_secs, Some(90));
        assert_eq!(merged.api_key.as_deref(), Some("key"));
    }
}
