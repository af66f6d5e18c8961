use serde::{Deserialize, Serialize};
use studyforge_llm::DEFAULT_MODEL;

/// Model selection and sampling knobs for the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub model: String,
    /// Override for the provider endpoint
    pub base_url: Option<String>,
    pub tip_temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            tip_temperature: 0.8,
        }
    }
}
