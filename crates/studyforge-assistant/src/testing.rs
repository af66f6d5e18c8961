//! In-process [`GenerativeClient`] that replays scripted replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use studyforge_llm::{
    ContentPart, EventStream, GenerateRequest, GenerateResponse, GenerativeClient, Message,
    StreamEvent,
};

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Failure(String),
    Stream(Vec<StreamEvent>),
    /// Emits the events, then fails
    BrokenStream(Vec<StreamEvent>, String),
}

#[derive(Debug)]
struct Rule {
    /// Only matches requests whose prompt contains this text
    needle: Option<String>,
    reply: Reply,
}

/// Each reply is consumed by the first request it matches, in push order
#[derive(Debug, Default)]
pub struct ScriptedClient {
    rules: Mutex<VecDeque<Rule>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Reply) -> &Self {
        self.push_rule(None, reply)
    }

    /// Reply only to a request whose prompt contains `needle`
    pub fn push_when(&self, needle: &str, reply: Reply) -> &Self {
        self.push_rule(Some(needle.to_string()), reply)
    }

    pub fn push_text(&self, text: &str) -> &Self {
        self.push(Reply::Text(text.to_string()))
    }

    pub fn push_failure(&self, message: &str) -> &Self {
        self.push(Reply::Failure(message.to_string()))
    }

    fn push_rule(&self, needle: Option<String>, reply: Reply) -> &Self {
        self.rules
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Rule { needle, reply });
        self
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn take_reply(&self, request: &GenerateRequest) -> Result<Reply> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        let prompt = prompt_text(request);
        let mut rules = self.rules.lock().unwrap_or_else(|e| e.into_inner());
        let index = rules
            .iter()
            .position(|rule| match &rule.needle {
                Some(needle) => prompt.contains(needle.as_str()),
                None => true,
            })
            .ok_or_else(|| anyhow!("no scripted reply for prompt: {}", prompt))?;
        rules
            .remove(index)
            .map(|rule| rule.reply)
            .ok_or_else(|| anyhow!("scripted reply vanished"))
    }
}

/// Text parts of the last user message
pub fn prompt_text(request: &GenerateRequest) -> String {
    let Some(Message::User { content }) = request
        .contents
        .iter()
        .rev()
        .find(|m| matches!(m, Message::User { .. }))
    else {
        return String::new();
    };
    content
        .clone()
        .into_parts()
        .into_iter()
        .filter_map(|part| match part {
            ContentPart::Text { text } => Some(text),
            ContentPart::InlineData { .. } => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        match self.take_reply(&request)? {
            Reply::Text(text) => Ok(GenerateResponse {
                text: Some(text),
                sources: Vec::new(),
                usage: None,
                finish_reason: Some("STOP".to_string()),
                raw: serde_json::Value::Null,
            }),
            Reply::Failure(message) => bail!(message),
            other => bail!("scripted stream used for a non-streaming call: {:?}", other),
        }
    }

    async fn generate_stream(&self, request: GenerateRequest) -> Result<EventStream> {
        let (events, failure) = match self.take_reply(&request)? {
            Reply::Stream(events) => (events, None),
            Reply::BrokenStream(events, message) => (events, Some(message)),
            Reply::Failure(message) => bail!(message),
            Reply::Text(text) => (
                vec![
                    StreamEvent::message(text),
                    StreamEvent::Done {
                        finish_reason: Some("STOP".to_string()),
                    },
                ],
                None,
            ),
        };

        let mut items: Vec<Result<StreamEvent>> = events.into_iter().map(Ok).collect();
        if let Some(message) = failure {
            items.push(Err(anyhow!(message)));
        }
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
