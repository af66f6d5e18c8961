use std::sync::Arc;

use studyforge_persist::NoteRepository;
use studyforge_types::{Clock, Note};

use crate::error::{AppError, Result};

const VOICE_NOTE_HEADER: &str = "[Voice Note]:\n";

/// The notes collection plus the currently open note
pub struct NoteBook {
    repo: NoteRepository,
    clock: Arc<dyn Clock>,
    notes: Vec<Note>,
    active: Option<String>,
}

impl NoteBook {
    pub fn new(repo: NoteRepository, clock: Arc<dyn Clock>) -> Self {
        let notes = repo.load_all();
        Self {
            repo,
            clock,
            notes,
            active: None,
        }
    }

    /// Re-reads the collection and closes the open note
    pub fn reload(&mut self) {
        self.notes = self.repo.load_all();
        self.active = None;
    }

    /// Collection order, newest insertions first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn active(&self) -> Option<&Note> {
        self.active.as_deref().and_then(|id| self.get(id))
    }

    fn active_id(&self) -> Result<String> {
        self.active().map(|n| n.id.clone()).ok_or(AppError::NoActiveNote)
    }

    fn next_id(&self) -> String {
        let mut millis = self.clock.now().timestamp_millis();
        while self.get(&millis.to_string()).is_some() {
            millis += 1;
        }
        millis.to_string()
    }

    /// Creates a blank note, stores it and opens it
    pub fn create(&mut self) -> Result<Note> {
        let note = Note::new(self.next_id());
        self.upsert(note.clone())?;
        tracing::debug!(id = %note.id, "Created note");
        Ok(note)
    }

    pub fn open(&mut self, id: &str) -> Result<&Note> {
        if self.get(id).is_none() {
            return Err(AppError::NoteNotFound(id.to_string()));
        }
        self.active = Some(id.to_string());
        self.active().ok_or_else(|| AppError::NoteNotFound(id.to_string()))
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    /// Replaces the note with the same id in place, or prepends it, then
    /// opens it
    pub fn upsert(&mut self, note: Note) -> Result<()> {
        let id = note.id.clone();
        self.notes = self.repo.upsert(note)?;
        self.active = Some(id);
        Ok(())
    }

    fn edit_active(&mut self, edit: impl FnOnce(&mut Note)) -> Result<Note> {
        let id = self.active_id()?;
        let mut note = self
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NoteNotFound(id.clone()))?;
        edit(&mut note);
        self.upsert(note.clone())?;
        Ok(note)
    }

    pub fn set_content(&mut self, content: &str) -> Result<Note> {
        self.edit_active(|note| note.content = content.to_string())
    }

    pub fn set_summary(&mut self, summary: String) -> Result<Note> {
        self.edit_active(|note| note.summary = summary)
    }

    /// Returns false when the tag was blank or already present
    pub fn add_tag(&mut self, raw: &str) -> Result<bool> {
        let mut added = false;
        self.edit_active(|note| added = note.add_tag(raw))?;
        Ok(added)
    }

    pub fn remove_tag(&mut self, tag: &str) -> Result<bool> {
        let mut removed = false;
        self.edit_active(|note| removed = note.remove_tag(tag))?;
        Ok(removed)
    }

    /// Appends text recognized from an image, after a blank line
    pub fn append_scanned(&mut self, text: &str) -> Result<Note> {
        self.edit_active(|note| append_paragraph(&mut note.content, text))
    }

    /// Appends a transcript under a voice-note header
    pub fn append_voice(&mut self, transcript: &str) -> Result<Note> {
        let block = format!("{}{}", VOICE_NOTE_HEADER, transcript);
        self.edit_active(|note| append_paragraph(&mut note.content, &block))
    }

    /// Removes the note and closes it if it was open
    pub fn delete(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(AppError::NoteNotFound(id.to_string()));
        }
        self.notes = self.repo.delete(id)?;
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    /// Notes matching `query` and carrying `tag`, newest first
    pub fn filtered(&self, query: &str, tag: Option<&str>) -> Vec<&Note> {
        let mut found: Vec<&Note> = self
            .notes
            .iter()
            .filter(|n| n.matches(query))
            .filter(|n| tag.map_or(true, |t| n.tags.iter().any(|nt| nt == t)))
            .collect();
        found.sort_by(|a, b| b.created_millis().cmp(&a.created_millis()));
        found
    }

    /// Every tag in use, first occurrence order
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.notes.iter().flat_map(|n| n.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }
}

fn append_paragraph(content: &mut String, text: &str) {
    if !content.is_empty() {
        content.push_str("\n\n");
    }
    content.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use studyforge_persist::MemoryStore;
    use studyforge_types::FixedClock;

    fn notebook() -> NoteBook {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        NoteBook::new(NoteRepository::new(Arc::new(MemoryStore::new())), clock)
    }

    #[test]
    fn test_ids_never_collide_under_a_frozen_clock() {
        let mut book = notebook();
        let a = book.create().unwrap();
        let b = book.create().unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(b.created_millis(), a.created_millis() + 1);
        assert_eq!(book.active().unwrap().id, b.id);
    }

    #[test]
    fn test_delete_active_closes_it() {
        let mut book = notebook();
        let a = book.create().unwrap();
        let b = book.create().unwrap();
        book.open(&a.id).unwrap();

        book.delete(&b.id).unwrap();
        assert_eq!(book.active().unwrap().id, a.id);

        book.delete(&a.id).unwrap();
        assert!(book.active().is_none());
        assert!(matches!(book.delete(&a.id), Err(AppError::NoteNotFound(_))));
    }

    #[test]
    fn test_captures_append_after_blank_line() {
        let mut book = notebook();
        book.create().unwrap();
        book.append_scanned("F = ma").unwrap();
        let note = book.append_voice("Newton's second law").unwrap();
        assert_eq!(note.content, "F = ma\n\n[Voice Note]:\nNewton's second law");
    }

    #[test]
    fn test_filter_by_query_and_tag_newest_first() {
        let mut book = notebook();
        book.create().unwrap();
        book.set_content("Cell division").unwrap();
        book.add_tag("Biology").unwrap();
        book.create().unwrap();
        book.set_content("Cell phones in class").unwrap();
        book.create().unwrap();
        book.set_content("Meiosis and cell cycle").unwrap();
        book.add_tag("biology").unwrap();
        book.add_tag("exam").unwrap();

        let all: Vec<&str> = book
            .filtered("cell", None)
            .iter()
            .map(|n| n.content.as_str())
            .collect();
        assert_eq!(
            all,
            vec!["Meiosis and cell cycle", "Cell phones in class", "Cell division"]
        );

        let tagged = book.filtered("cell", Some("biology"));
        assert_eq!(tagged.len(), 2);
        assert_eq!(book.all_tags(), vec!["biology", "exam"]);
    }
}
