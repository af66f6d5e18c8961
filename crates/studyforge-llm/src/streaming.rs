use std::pin::Pin;
use anyhow::Result;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::types::WebSource;

/// Boxed stream of generation events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent>> + Send>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// Text increment, in arrival order
    Message {
        content: String,
    },

    /// Citations reported alongside a chunk
    Grounding {
        sources: Vec<WebSource>,
    },

    Done {
        #[serde(skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
    },
}

impl StreamEvent {
    pub fn message(content: impl Into<String>) -> Self {
        Self::Message {
            content: content.into(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
