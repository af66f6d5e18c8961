use std::sync::Arc;

use studyforge_types::Note;

use crate::error::Result;
use crate::keys;
use crate::store::{KeyValueStore, KeyValueStoreExt};

/// The notes collection, stored as one ordered JSON array
#[derive(Clone)]
pub struct NoteRepository {
    store: Arc<dyn KeyValueStore>,
}

impl NoteRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_all(&self) -> Vec<Note> {
        self.store.get_or_default(keys::NOTES)
    }

    pub fn save_all(&self, notes: &[Note]) -> Result<()> {
        self.store.set_json(keys::NOTES, notes)
    }

    /// Replaces the note with the same id in place, or prepends it.
    /// Returns the collection as written.
    pub fn upsert(&self, note: Note) -> Result<Vec<Note>> {
        let mut notes = self.load_all();
        match notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note,
            None => notes.insert(0, note),
        }
        self.save_all(&notes)?;
        Ok(notes)
    }

    /// Removes every note with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<Vec<Note>> {
        let mut notes = self.load_all();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() != before {
            self.save_all(&notes)?;
        }
        Ok(notes)
    }

    pub fn get(&self, id: &str) -> Option<Note> {
        self.load_all().into_iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbs::MemoryStore;

    fn note(id: &str, content: &str) -> Note {
        let mut n = Note::new(id);
        n.content = content.to_string();
        n
    }

    #[test]
    fn test_upsert_prepends_new_and_replaces_existing_in_place() {
        let repo = NoteRepository::new(Arc::new(MemoryStore::new()));
        repo.upsert(note("1", "a")).unwrap();
        repo.upsert(note("2", "b")).unwrap();
        repo.upsert(note("3", "c")).unwrap();

        let notes = repo.upsert(note("2", "changed")).unwrap();
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(notes[1].content, "changed");
        assert_eq!(repo.load_all(), notes);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let repo = NoteRepository::new(Arc::new(MemoryStore::new()));
        repo.upsert(note("1", "a")).unwrap();
        let notes = repo.delete("missing").unwrap();
        assert_eq!(notes.len(), 1);
        assert!(repo.delete("1").unwrap().is_empty());
        assert!(repo.get("1").is_none());
    }
}
