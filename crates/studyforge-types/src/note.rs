use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled Note";

/// A user note. `id` is the creation timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Trimmed, lower-cased tag; `None` for blank input
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

impl Note {
    /// Blank note
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: String::new(),
            summary: String::new(),
            tags: Vec::new(),
        }
    }

    /// First content line, or a placeholder
    pub fn title(&self) -> &str {
        self.content
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or(UNTITLED)
    }

    /// Numeric form of the id, used for newest-first ordering
    pub fn created_millis(&self) -> i64 {
        self.id.parse().unwrap_or(0)
    }

    /// Summary when present, otherwise the raw content
    pub fn study_text(&self) -> &str {
        if self.summary.trim().is_empty() {
            &self.content
        } else {
            &self.summary
        }
    }

    /// Adds a tag after normalizing; returns false for blanks and duplicates
    pub fn add_tag(&mut self, raw: &str) -> bool {
        match normalize_tag(raw) {
            Some(tag) if !self.tags.contains(&tag) => {
                self.tags.push(tag);
                true
            }
            _ => false,
        }
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Case-insensitive match against content, summary and tags
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.content.to_lowercase().contains(&query)
            || self.summary.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back() {
        let mut note = Note::new("1");
        assert_eq!(note.title(), UNTITLED);
        note.content = "Cell biology\nmitochondria".into();
        assert_eq!(note.title(), "Cell biology");
    }

    #[test]
    fn test_tags_are_case_folded_and_unique() {
        let mut note = Note::new("1");
        assert!(note.add_tag("  Biology "));
        assert!(!note.add_tag("BIOLOGY"));
        assert!(!note.add_tag("   "));
        assert_eq!(note.tags, vec!["biology"]);
        assert!(note.remove_tag("biology"));
        assert!(!note.remove_tag("biology"));
    }

    #[test]
    fn test_matches_any_field() {
        let note = Note {
            id: "1".into(),
            content: "Krebs cycle".into(),
            summary: "ATP production".into(),
            tags: vec!["exam".into()],
        };
        assert!(note.matches("krebs"));
        assert!(note.matches("atp"));
        assert!(note.matches("EXA"));
        assert!(!note.matches("photosynthesis"));
        assert!(note.matches(""));
    }

    #[test]
    fn test_deserializes_with_missing_fields() {
        let note: Note = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(note.created_millis(), 42);
        assert!(note.tags.is_empty());
    }
}
