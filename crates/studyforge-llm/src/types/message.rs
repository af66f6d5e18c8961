use serde::{Deserialize, Serialize};
use super::content::Content;

/// One conversational turn (provider-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Turn written by the user
    User {
        content: Content,
    },

    /// Turn produced by the model
    Model {
        content: Content,
    },
}

impl Message {
    pub fn user(content: impl Into<Content>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<Content>) -> Self {
        Self::Model {
            content: content.into(),
        }
    }

    /// Wire role name
    pub fn role(&self) -> &str {
        match self {
            Self::User { .. } => "user",
            Self::Model { .. } => "model",
        }
    }

    pub fn content(&self) -> &Content {
        match self {
            Self::User { content } | Self::Model { content } => content,
        }
    }
}
