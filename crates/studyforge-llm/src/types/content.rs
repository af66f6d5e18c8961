use base64::Engine;
use serde::{Deserialize, Serialize};

/// Content that can be sent in a turn.
/// Either plain text or a list of parts mixing text and inline binary data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Simple text content
    Text(String),

    /// Multipart content (text + images/audio)
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },

    /// Binary payload, base64 encoded
    InlineData {
        mime_type: String,
        data: String,
    },
}

impl ContentPart {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { text: s.into() }
    }

    /// Encode raw bytes as an inline data part
    pub fn inline_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::InlineData {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

impl Content {
    /// Create text content
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn parts(parts: Vec<ContentPart>) -> Self {
        Self::Parts(parts)
    }

    /// Get as plain text (if possible)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Parts(parts) => match parts.as_slice() {
                [ContentPart::Text { text }] => Some(text),
                _ => None,
            },
        }
    }

    /// Flatten into a list of parts
    pub fn into_parts(self) -> Vec<ContentPart> {
        match self {
            Self::Text(text) => vec![ContentPart::Text { text }],
            Self::Parts(parts) => parts,
        }
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_bytes_are_base64() {
        let part = ContentPart::inline_bytes("image/jpeg", b"hello");
        match part {
            ContentPart::InlineData { mime_type, data } => {
                assert_eq!(mime_type, "image/jpeg");
                assert_eq!(data, "aGVsbG8=");
            }
            _ => panic!("Expected InlineData"),
        }
    }

    #[test]
    fn test_single_text_part_as_text() {
        let content = Content::parts(vec![ContentPart::text("only")]);
        assert_eq!(content.as_text(), Some("only"));

        let mixed = Content::parts(vec![
            ContentPart::inline_bytes("audio/webm", b"x"),
            ContentPart::text("caption"),
        ]);
        assert_eq!(mixed.as_text(), None);
    }
}
