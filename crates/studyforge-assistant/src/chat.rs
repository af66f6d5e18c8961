use std::pin::Pin;
use std::sync::{Arc, Mutex};

use futures::{Stream, StreamExt};
use studyforge_llm::{
    GenerateOptions, GenerateRequest, GenerativeClient, Message, StreamEvent, WebSource,
};

use crate::error::{AssistantError, Result};

/// Increment of a streamed chat reply
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Next piece of reply text, in arrival order
    Text(String),
    /// Web citations attached to the reply so far
    Sources(Vec<WebSource>),
    /// Reply finished; the exchange is now part of the session history
    Done,
}

pub type ChatStream = Pin<Box<dyn Stream<Item = Result<ChatEvent>> + Send>>;

/// Stateful conversation bound to a fixed system instruction.
///
/// The model-side transcript only grows once a reply completes. A failed
/// exchange leaves it untouched so the next message starts from the last
/// good turn.
#[derive(Clone)]
pub struct ChatSession {
    client: Arc<dyn GenerativeClient>,
    model: String,
    system_instruction: String,
    turns: Arc<Mutex<Vec<Message>>>,
}

impl ChatSession {
    pub fn new(
        client: Arc<dyn GenerativeClient>,
        model: impl Into<String>,
        system_instruction: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            system_instruction: system_instruction.into(),
            turns: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// Completed turns so far
    pub fn turns(&self) -> Vec<Message> {
        self.turns.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Sends `text` and streams the reply. `web_search` enables grounding
    /// for this message only.
    pub async fn send_message_stream(&self, text: &str, web_search: bool) -> Result<ChatStream> {
        let mut contents = self.turns();
        contents.push(Message::user(text));

        let request = GenerateRequest::new(self.model.clone(), contents)
            .with_system_instruction(self.system_instruction.clone())
            .with_options(GenerateOptions::new().web_search(web_search));

        tracing::debug!(web_search, "Sending chat message");
        let mut upstream = self.client.generate_stream(request).await?;

        let turns = self.turns.clone();
        let user_text = text.to_string();

        let stream = async_stream::stream! {
            let mut reply = String::new();

            while let Some(item) = upstream.next().await {
                match item {
                    Ok(StreamEvent::Message { content }) => {
                        reply.push_str(&content);
                        yield Ok(ChatEvent::Text(content));
                    }
                    Ok(StreamEvent::Grounding { sources }) => {
                        yield Ok(ChatEvent::Sources(sources));
                    }
                    Ok(StreamEvent::Done { .. }) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Chat stream failed");
                        yield Err(AssistantError::Remote(e));
                        return;
                    }
                }
            }

            {
                let mut turns = turns.lock().unwrap_or_else(|e| e.into_inner());
                turns.push(Message::user(user_text));
                turns.push(Message::model(reply));
            }
            yield Ok(ChatEvent::Done);
        };

        Ok(Box::pin(stream))
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("model", &self.model)
            .field("turns", &self.turns().len())
            .finish()
    }
}
