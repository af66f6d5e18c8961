// Gemini-specific client implementation

use crate::gemini::wire::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, GoogleSearch,
    InlineData, WireContent, WirePart, WireTool,
};
use crate::sse::{parse_sse_stream, SseLineParser};
use crate::streaming::{EventStream, StreamEvent};
use crate::traits::{GenerateRequest, GenerateResponse, GenerativeClient, TokenUsage};
use crate::types::{Content, ContentPart, Message};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini client (HTTP direct, no SDK)
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, GEMINI_API_BASE)
    }

    /// Create a client against a custom endpoint (proxies, tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            anyhow::bail!("API key is missing");
        }

        let mut key_value = HeaderValue::from_str(api_key).context("Invalid API key format")?;
        key_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, key_value);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build generateContent payload
    fn build_request(&self, request: GenerateRequest) -> GenerateContentRequest {
        let contents = request
            .contents
            .into_iter()
            .map(|msg| self.convert_message(msg))
            .collect();

        let system_instruction = request.system_instruction.map(|text| WireContent {
            role: None,
            parts: vec![WirePart {
                text: Some(text),
                inline_data: None,
            }],
        });

        let options = request.options;
        let generation_config = GenerationConfig {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
            response_mime_type: options
                .response_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: options.response_schema,
        };

        let tools = options.web_search.then(|| {
            vec![WireTool {
                google_search: GoogleSearch::default(),
            }]
        });

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: (!generation_config.is_empty()).then_some(generation_config),
            tools,
        }
    }

    /// Convert our Message type to Gemini format
    fn convert_message(&self, message: Message) -> WireContent {
        let role = message.role().to_string();
        let content = match message {
            Message::User { content } | Message::Model { content } => content,
        };

        WireContent {
            role: Some(role),
            parts: self.convert_content(content),
        }
    }

    fn convert_content(&self, content: Content) -> Vec<WirePart> {
        content
            .into_parts()
            .into_iter()
            .map(|part| match part {
                ContentPart::Text { text } => WirePart {
                    text: Some(text),
                    inline_data: None,
                },
                ContentPart::InlineData { mime_type, data } => WirePart {
                    text: None,
                    inline_data: Some(InlineData { mime_type, data }),
                },
            })
            .collect()
    }

    async fn post(&self, url: String, payload: &GenerateContentRequest) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .post(url)
            .json(payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, error_text);
        }

        Ok(response)
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let model = request.model.clone();
        let payload = self.build_request(request);
        tracing::debug!(model = %model, turns = payload.contents.len(), "generateContent");

        let response = self
            .post(format!("{}/models/{}:generateContent", self.base_url, model), &payload)
            .await?;

        let raw: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        // Convert to provider-agnostic response
        Ok(GenerateResponse {
            text: raw.text(),
            sources: raw.sources(),
            usage: raw.usage_metadata.as_ref().map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: raw.finish_reason(),
            raw: serde_json::to_value(&raw)?,
        })
    }

    async fn generate_stream(&self, request: GenerateRequest) -> Result<EventStream> {
        let model = request.model.clone();
        let payload = self.build_request(request);
        tracing::debug!(model = %model, turns = payload.contents.len(), "streamGenerateContent");

        let response = self
            .post(
                format!("{}/models/{}:streamGenerateContent?alt=sse", self.base_url, model),
                &payload,
            )
            .await?;

        Ok(parse_sse_stream(response, GeminiChunkParser))
    }
}

/// Each SSE `data:` line is a complete GenerateContentResponse
pub struct GeminiChunkParser;

impl SseLineParser for GeminiChunkParser {
    fn parse_data_line(&self, data: &str) -> Result<Vec<StreamEvent>> {
        let chunk: GenerateContentResponse = serde_json::from_str(data)
            .map_err(|e| anyhow::anyhow!("Failed to parse stream chunk: {}", e))?;
        Ok(chunk.to_stream_events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::GenerateOptions;
    use crate::types::Schema;

    #[test]
    fn test_rejects_blank_key() {
        assert!(GeminiClient::new("   ").is_err());
        assert!(GeminiClient::new("bad\nkey").is_err());
        assert!(GeminiClient::new("AIza-test").is_ok());
    }

    #[test]
    fn test_payload_with_schema_and_search() {
        let client = GeminiClient::new("key").unwrap();
        let request = GenerateRequest::new("gemini-2.5-flash", vec![Message::user("hi")])
            .with_system_instruction("be brief")
            .with_options(
                GenerateOptions::new()
                    .temperature(0.8)
                    .response_schema(Schema::array(Schema::string()))
                    .web_search(true),
            );

        let json = serde_json::to_value(client.build_request(request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(json["tools"][0]["googleSearch"].is_object());
    }

    #[test]
    fn test_plain_payload_omits_optional_sections() {
        let client = GeminiClient::new("key").unwrap();
        let request = GenerateRequest::new(
            "gemini-2.5-flash",
            vec![Message::user(Content::parts(vec![
                ContentPart::inline_bytes("image/jpeg", b"jpg"),
                ContentPart::text("read this"),
            ]))],
        );

        let json = serde_json::to_value(client.build_request(request)).unwrap();
        assert!(json.get("generationConfig").is_none());
        assert!(json.get("tools").is_none());
        assert!(json.get("systemInstruction").is_none());
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(json["contents"][0]["parts"][1]["text"], "read this");
    }
}
