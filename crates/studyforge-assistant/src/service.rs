use std::sync::Arc;

use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use studyforge_llm::{
    ClientFactory, Content, ContentPart, GenerateOptions, GenerateRequest, GenerativeClient,
    Message, ProviderConfig, Schema,
};
use studyforge_types::{Flashcard, GenerationOptions, QuizQuestion, StudyPlan};

use crate::chat::ChatSession;
use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::{prompts, schemas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    Cleared,
}

/// Facade over the generative model.
///
/// Owns at most one client handle. Every task operation fails fast with
/// [`AssistantError::Uninitialized`] when no handle is present; remote
/// failures never escape and are turned into fixed fallbacks instead.
pub struct AssistantService {
    config: AssistantConfig,
    client: Option<Arc<dyn GenerativeClient>>,
    lifecycle: Lifecycle,
}

impl AssistantService {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            client: None,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Ready service around an existing client
    pub fn from_client(config: AssistantConfig, client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            config,
            client: Some(client),
            lifecycle: Lifecycle::Ready,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Builds a client for `credential`. On failure any previous handle is
    /// dropped and the service is back to uninitialized.
    pub fn try_initialize(&mut self, credential: &str) -> Result<()> {
        self.client = None;
        self.lifecycle = Lifecycle::Uninitialized;

        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AssistantError::InvalidCredential(
                "API key is missing".to_string(),
            ));
        }

        let provider =
            ProviderConfig::gemini(credential).with_base_url(self.config.base_url.clone());
        let client = ClientFactory::create_client(provider)
            .map_err(|e| AssistantError::InvalidCredential(e.to_string()))?;

        self.client = Some(client);
        self.lifecycle = Lifecycle::Ready;
        tracing::info!(model = %self.config.model, "Assistant initialized");
        Ok(())
    }

    pub fn initialize(&mut self, credential: &str) -> bool {
        match self.try_initialize(credential) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize assistant");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.client = None;
        self.lifecycle = Lifecycle::Cleared;
        tracing::info!("Assistant cleared");
    }

    fn client(&self) -> Result<&Arc<dyn GenerativeClient>> {
        self.client.as_ref().ok_or(AssistantError::Uninitialized)
    }

    fn request(&self, content: impl Into<Content>) -> GenerateRequest {
        GenerateRequest::new(self.config.model.clone(), vec![Message::user(content)])
    }

    async fn generate_text(
        client: &Arc<dyn GenerativeClient>,
        request: GenerateRequest,
    ) -> anyhow::Result<String> {
        let response = client.generate(request).await?;
        response
            .text
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| anyhow!("model returned no text"))
    }

    async fn generate_structured<T: DeserializeOwned>(
        client: &Arc<dyn GenerativeClient>,
        request: GenerateRequest,
        schema: Schema,
    ) -> anyhow::Result<T> {
        let request = request.with_options(GenerateOptions::new().response_schema(schema));
        let text = Self::generate_text(client, request).await?;
        serde_json::from_str(text.trim()).context("Failed to parse structured response")
    }

    fn or_fallback(result: anyhow::Result<String>, operation: &str, fallback: &str) -> String {
        result.unwrap_or_else(|e| {
            tracing::error!(operation, error = %e, "Remote call failed, using fallback");
            fallback.to_string()
        })
    }

    /// Markdown summary of `text`
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let client = self.client()?;
        let result = Self::generate_text(client, self.request(prompts::summarize(text))).await;
        Ok(Self::or_fallback(result, "summarize", prompts::SUMMARY_FALLBACK))
    }

    /// Text recognized in a JPEG image
    pub async fn extract_text(&self, image: &[u8]) -> Result<String> {
        let client = self.client()?;
        let content = Content::parts(vec![
            ContentPart::inline_bytes(prompts::IMAGE_MIME_TYPE, image),
            ContentPart::text(prompts::EXTRACT_TEXT),
        ]);
        let result = Self::generate_text(client, self.request(content)).await;
        Ok(Self::or_fallback(result, "extract_text", prompts::IMAGE_FALLBACK))
    }

    pub async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String> {
        let client = self.client()?;
        let content = Content::parts(vec![
            ContentPart::inline_bytes(mime_type, audio),
            ContentPart::text(prompts::TRANSCRIBE),
        ]);
        let result = Self::generate_text(client, self.request(content)).await;
        Ok(Self::or_fallback(result, "transcribe", prompts::AUDIO_FALLBACK))
    }

    /// At most `options.count` cards. Empty means nothing usable came back.
    pub async fn generate_flashcards(
        &self,
        notes: &str,
        options: GenerationOptions,
    ) -> Result<Vec<Flashcard>> {
        let client = self.client()?;
        let request = self.request(prompts::flashcards(notes, &options));
        let cards: Vec<Flashcard> =
            match Self::generate_structured(client, request, schemas::flashcards()).await {
                Ok(cards) => cards,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to generate flashcards");
                    return Ok(Vec::new());
                }
            };

        Ok(cards
            .into_iter()
            .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
            .take(options.count)
            .collect())
    }

    /// At most `options.count` questions, each with four options containing
    /// the correct answer. Malformed entries are dropped.
    pub async fn generate_quiz(
        &self,
        notes: &str,
        options: GenerationOptions,
    ) -> Result<Vec<QuizQuestion>> {
        let client = self.client()?;
        let request = self.request(prompts::quiz(notes, &options));
        let questions: Vec<QuizQuestion> =
            match Self::generate_structured(client, request, schemas::quiz()).await {
                Ok(questions) => questions,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to generate quiz");
                    return Ok(Vec::new());
                }
            };

        let total = questions.len();
        let valid: Vec<QuizQuestion> = questions
            .into_iter()
            .filter(QuizQuestion::is_well_formed)
            .take(options.count)
            .collect();
        if valid.len() < total.min(options.count) {
            tracing::warn!(total, kept = valid.len(), "Dropped malformed quiz questions");
        }
        Ok(valid)
    }

    /// `None` when the model fails or returns a plan without any period
    pub async fn generate_study_plan(
        &self,
        topic: &str,
        duration: &str,
        goals: &str,
    ) -> Result<Option<StudyPlan>> {
        let client = self.client()?;
        let request = self.request(prompts::study_plan(topic, duration, goals));
        match Self::generate_structured::<StudyPlan>(client, request, schemas::study_plan()).await
        {
            Ok(plan) if !plan.schedule.is_empty() => Ok(Some(plan)),
            Ok(_) => {
                tracing::warn!(topic, "Model returned an empty study plan");
                Ok(None)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate study plan");
                Ok(None)
            }
        }
    }

    /// Fresh tip from the model, sampled with a higher temperature
    pub async fn study_tip(&self) -> Result<String> {
        let client = self.client()?;
        let request = self
            .request(prompts::STUDY_TIP)
            .with_options(GenerateOptions::new().temperature(self.config.tip_temperature));
        let result = Self::generate_text(client, request).await;
        Ok(Self::or_fallback(result, "study_tip", prompts::TIP_FALLBACK))
    }

    pub fn create_chat_session(&self) -> Result<ChatSession> {
        let client = self.client()?;
        Ok(ChatSession::new(
            client.clone(),
            self.config.model.clone(),
            prompts::CHAT_SYSTEM_INSTRUCTION,
        ))
    }
}

impl std::fmt::Debug for AssistantService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantService")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
