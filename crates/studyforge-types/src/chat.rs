use serde::{Deserialize, Serialize};
use studyforge_llm::WebSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// Web citation shown under an AI reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub uri: String,
    pub title: String,
}

impl From<WebSource> for GroundingSource {
    /// Untitled sources are labelled with their uri
    fn from(source: WebSource) -> Self {
        let title = source
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| source.uri.clone());
        Self {
            uri: source.uri,
            title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            sources: None,
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
            sources: None,
        }
    }

    pub fn is_ai(&self) -> bool {
        self.sender == Sender::Ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untitled_source_uses_uri() {
        let source: GroundingSource = WebSource::new("https://x.example", None).into();
        assert_eq!(source.title, "https://x.example");
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(ChatMessage::ai("hi")).unwrap();
        assert_eq!(json["sender"], "ai");
        assert!(json.get("sources").is_none());
    }
}
