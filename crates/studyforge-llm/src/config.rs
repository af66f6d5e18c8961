// Configuration layer for creating generative clients
// Keeps credential handling in one place so callers only deal with the trait

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::gemini::GeminiClient;
use crate::traits::GenerativeClient;

/// Model used when the configuration names none
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini provider
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Base URL (optional, defaults to the public v1beta endpoint)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Provider-specific configuration details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini(GeminiConfig),
}

impl ProviderConfig {
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self::Gemini(GeminiConfig::new(api_key))
    }

    /// Point the provider at another endpoint
    pub fn with_base_url(self, base_url: Option<String>) -> Self {
        match (self, base_url) {
            (Self::Gemini(config), Some(url)) => Self::Gemini(config.with_base_url(url)),
            (config, None) => config,
        }
    }
}

/// Factory for creating clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_client(config: ProviderConfig) -> Result<Arc<dyn GenerativeClient>> {
        match config {
            ProviderConfig::Gemini(gemini) => {
                let client = match gemini.base_url {
                    Some(base_url) => GeminiClient::with_base_url(gemini.api_key, base_url)?,
                    None => GeminiClient::new(gemini.api_key)?,
                };
                Ok(Arc::new(client))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_rejects_empty_key() {
        assert!(ClientFactory::create_client(ProviderConfig::gemini("")).is_err());
    }

    #[test]
    fn test_factory_builds_client() {
        let config = ProviderConfig::gemini("key").with_base_url(Some("http://localhost:1".into()));
        assert!(ClientFactory::create_client(config).is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProviderConfig::gemini("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = ProviderConfig::gemini("k").with_base_url(Some("http://proxy".into()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"gemini\""));
        let back: ProviderConfig = serde_json::from_str(&json).unwrap();
        let ProviderConfig::Gemini(inner) = back;
        assert_eq!(inner.base_url.as_deref(), Some("http://proxy"));
    }
}
