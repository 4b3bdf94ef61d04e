//! Settings structures for Coffee Finder configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub search: SearchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            server: ServerSettings::default(),
            api: ApiSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (COFFEE_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable source
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("COFFEE_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("COFFEE_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("COFFEE_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Some(val) = lookup("COFFEE_API_BASE_URL") {
            self.api.base_url = val;
        }
        if let Some(val) = lookup("COFFEE_API_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.api.request_timeout = timeout;
            }
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Instance name displayed in UI
    pub instance_name: String,
    /// Link to the upstream API documentation, shown in the footer
    pub docs_url: Option<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Coffee Places Finder".to_string(),
            docs_url: None,
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Upstream places API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL; `/places` is appended to it
    pub base_url: String,
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Extra headers to send with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".to_string(),
            request_timeout: 10.0,
            extra_headers: HashMap::new(),
        }
    }
}

/// A fallback city: canonical key plus display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackCity {
    pub key: String,
    pub display: String,
}

impl FallbackCity {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display: display.into(),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Minimum time the loading state stays visible, in milliseconds
    pub min_display_ms: u64,
    /// Tags offered for autocomplete and quick suggestions
    pub tags: Vec<String>,
    /// Cities used for autocomplete before the index is populated
    pub fallback_cities: Vec<FallbackCity>,
    /// Rebuild the suggestion index every N seconds (0 = once at startup)
    pub index_refresh_secs: u64,
    /// Drop idle search sessions after N seconds
    pub session_idle_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_display_ms: 1000,
            tags: vec!["wifi".to_string()],
            fallback_cities: default_fallback_cities(),
            index_refresh_secs: 0,
            session_idle_secs: 1800,
        }
    }
}

fn default_fallback_cities() -> Vec<FallbackCity> {
    vec![
        FallbackCity::new("amsterdam", "Amsterdam"),
        FallbackCity::new("rotterdam", "Rotterdam"),
        FallbackCity::new("the-hague", "The Hague"),
        FallbackCity::new("utrecht", "Utrecht"),
        FallbackCity::new("eindhoven", "Eindhoven"),
        FallbackCity::new("groningen", "Groningen"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert!(!settings.general.debug);
        assert_eq!(settings.search.min_display_ms, 1000);
        assert_eq!(settings.search.tags, vec!["wifi"]);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
api:
  base_url: "https://places.example.com/api"
search:
  tags: [wifi, cozy]
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.api.base_url, "https://places.example.com/api");
        assert_eq!(settings.api.request_timeout, 10.0);
        assert_eq!(settings.search.tags, vec!["wifi", "cozy"]);
        assert!(settings
            .search
            .fallback_cities
            .contains(&FallbackCity::new("the-hague", "The Hague")));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "COFFEE_PORT" => Some("9000".to_string()),
            "COFFEE_API_BASE_URL" => Some("http://api.local".to_string()),
            "COFFEE_API_TIMEOUT" => Some("not-a-number".to_string()),
            _ => None,
        });
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.api.base_url, "http://api.local");
        assert_eq!(settings.api.request_timeout, 10.0);
    }
}
