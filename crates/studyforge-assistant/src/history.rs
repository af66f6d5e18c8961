//! Chat history reducer.
//!
//! The displayed history is rebuilt step by step from the events of one
//! exchange. Every step consumes the previous history and returns the next,
//! so a reply under construction is never aliased.

use std::collections::HashSet;

use studyforge_llm::WebSource;
use studyforge_types::{ChatMessage, GroundingSource};

use crate::chat::ChatEvent;
use crate::prompts;

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryAction {
    /// The user sent a message
    UserSent(String),
    /// Full reply text accumulated so far
    Reply(String),
    /// Deduplicated sources for the finished reply
    Sources(Vec<GroundingSource>),
    /// The exchange failed
    Failed,
}

/// Applies one action to the history
pub fn reduce(mut history: Vec<ChatMessage>, action: HistoryAction) -> Vec<ChatMessage> {
    match action {
        HistoryAction::UserSent(text) => history.push(ChatMessage::user(text)),
        HistoryAction::Reply(text) => match history.last_mut() {
            Some(last) if last.is_ai() => last.text = text,
            _ => history.push(ChatMessage::ai(text)),
        },
        HistoryAction::Sources(sources) => {
            if let Some(last) = history.last_mut().filter(|m| m.is_ai()) {
                last.sources = (!sources.is_empty()).then_some(sources);
            }
        }
        HistoryAction::Failed => match history.last_mut() {
            Some(last) if last.is_ai() => {
                last.text = prompts::CHAT_REPLY_ERROR.to_string();
                last.sources = None;
            }
            _ => history.push(ChatMessage::ai(prompts::CHAT_REPLY_ERROR)),
        },
    }
    history
}

/// History to show when the chat screen opens
pub fn seed(history: Vec<ChatMessage>, session_available: bool) -> Vec<ChatMessage> {
    if !session_available {
        return vec![ChatMessage::ai(prompts::CHAT_INIT_ERROR)];
    }
    if history.is_empty() {
        return vec![ChatMessage::ai(prompts::CHAT_GREETING)];
    }
    history
}

/// Sources with a uri, first occurrence per uri kept, untitled ones labelled
/// with their uri
pub fn dedupe_sources(raw: impl IntoIterator<Item = WebSource>) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .filter(|s| !s.uri.trim().is_empty())
        .filter(|s| seen.insert(s.uri.clone()))
        .map(GroundingSource::from)
        .collect()
}

/// Tracks one in-flight exchange and turns stream events into history
/// actions
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    text: String,
    sources: Vec<WebSource>,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Action for `event`, if it changes what is displayed
    pub fn on_event(&mut self, event: ChatEvent) -> Option<HistoryAction> {
        match event {
            ChatEvent::Text(piece) => {
                self.text.push_str(&piece);
                Some(HistoryAction::Reply(self.text.clone()))
            }
            ChatEvent::Sources(sources) => {
                self.sources.extend(sources);
                None
            }
            ChatEvent::Done => Some(HistoryAction::Sources(dedupe_sources(std::mem::take(
                &mut self.sources,
            )))),
        }
    }
}
