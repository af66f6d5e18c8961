use crate::streaming::EventStream;
use crate::types::{Message, Schema, WebSource};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for generative-model interactions
///
/// Provides both one-shot and streaming generation. Implementations are
/// stateless; conversation history travels in the request.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Non-streaming generation
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Streaming generation
    async fn generate_stream(&self, request: GenerateRequest) -> Result<EventStream>;
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: Vec<Message>,
    pub system_instruction: Option<String>,
    pub options: GenerateOptions,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, contents: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            contents,
            system_instruction: None,
            options: GenerateOptions::default(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Constrain the reply to JSON matching this schema
    pub response_schema: Option<Schema>,
    /// Enable web-search grounding
    pub web_search: bool,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    pub fn response_schema(mut self, schema: Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub text: Option<String>,
    pub sources: Vec<WebSource>,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
    pub raw: serde_json::Value,
}

impl GenerateResponse {
    /// Reply text, empty when the model produced none
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}
