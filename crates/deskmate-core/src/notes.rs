//! Notes collection persisted as one JSON array.
//!
//! The whole list is read once on `load` and written back after every
//! mutation. Storage failures never reach the caller: a failed read
//! starts from an empty list and a failed write is only logged.

use tracing::{debug, warn};

use crate::error::{DeskmateError, Result};
use crate::models::Note;
use crate::storage::KeyValueStore;

pub const NOTES_KEY: &str = "NOTES_DATA";

pub struct NotesBook<S> {
    store: S,
    notes: Vec<Note>,
}

fn validate(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(DeskmateError::InvalidInput("Note title cannot be empty".to_string()));
    }
    if content.trim().is_empty() {
        return Err(DeskmateError::InvalidInput("Note content cannot be empty".to_string()));
    }
    Ok(())
}

impl<S: KeyValueStore> NotesBook<S> {
    /// Read the stored notes.
    pub async fn load(store: S) -> Self {
        let notes = match store.get_item(NOTES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => notes,
                Err(e) => {
                    warn!(key = NOTES_KEY, error = %e, "ignoring malformed notes");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = NOTES_KEY, error = %e, "failed to read notes");
                Vec::new()
            }
        };

        debug!(count = notes.len(), "loaded notes");
        Self { store, notes }
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Append a new note. Title and content must both be non-blank.
    pub async fn add(&mut self, title: String, content: String) -> Result<Note> {
        validate(&title, &content)?;

        let note = Note::new(title, content);
        self.notes.push(note.clone());
        debug!(id = %note.id, "added note");
        self.persist().await;
        Ok(note)
    }

    /// Replace title and content of an existing note, keeping its position.
    pub async fn update(&mut self, id: &str, title: String, content: String) -> Result<Note> {
        validate(&title, &content)?;

        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| DeskmateError::NotFound(format!("note {}", id)))?;
        note.title = title;
        note.content = content;
        let updated = note.clone();

        debug!(id, "updated note");
        self.persist().await;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| DeskmateError::NotFound(format!("note {}", id)))?;
        let removed = self.notes.remove(index);

        debug!(id, "deleted note");
        self.persist().await;
        Ok(removed)
    }

    async fn persist(&self) {
        if let Err(e) = self.try_persist().await {
            warn!(key = NOTES_KEY, error = %e, "failed to save notes");
        }
    }

    async fn try_persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.notes)?;
        self.store.set_item(NOTES_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;

    async fn setup_book() -> NotesBook<LocalStore> {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();
        NotesBook::load(store).await
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let book = setup_book().await;
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_fields() {
        let mut book = setup_book().await;

        let err = book.add("  ".to_string(), "body".to_string()).await.unwrap_err();
        assert!(matches!(err, DeskmateError::InvalidInput(_)));

        let err = book.add("Title".to_string(), "\n".to_string()).await.unwrap_err();
        assert!(matches!(err, DeskmateError::InvalidInput(_)));

        assert!(book.is_empty());
        assert_eq!(book.store().get_item(NOTES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_saves_whole_list() {
        let mut book = setup_book().await;
        book.add("One".to_string(), "first".to_string()).await.unwrap();
        book.add("Two".to_string(), "second".to_string()).await.unwrap();

        let raw = book.store().get_item(NOTES_KEY).await.unwrap().unwrap();
        let stored: Vec<Note> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, book.list());
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let mut book = setup_book().await;
        let first = book.add("One".to_string(), "first".to_string()).await.unwrap();
        book.add("Two".to_string(), "second".to_string()).await.unwrap();

        let updated = book
            .update(&first.id, "Uno".to_string(), "primero".to_string())
            .await
            .unwrap();

        assert_eq!(updated.id, first.id);
        assert_eq!(book.list()[0].title, "Uno");
        assert_eq!(book.list()[0].content, "primero");
        assert_eq!(book.list()[1].title, "Two");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let mut book = setup_book().await;
        let err = book
            .update("missing", "T".to_string(), "C".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DeskmateError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut book = setup_book().await;
        let note = book.add("One".to_string(), "first".to_string()).await.unwrap();

        let removed = book.delete(&note.id).await.unwrap();
        assert_eq!(removed, note);
        assert!(book.get(&note.id).is_none());
        assert_eq!(
            book.store().get_item(NOTES_KEY).await.unwrap().as_deref(),
            Some("[]")
        );

        assert!(matches!(
            book.delete(&note.id).await.unwrap_err(),
            DeskmateError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_malformed_json_loads_empty() {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();
        store.set_item(NOTES_KEY, "{not json").await.unwrap();

        let book = NotesBook::load(store).await;
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_loads_empty() {
        // No migrations: the table is missing and every read fails.
        let store = LocalStore::new_in_memory().await.unwrap();
        let mut book = NotesBook::load(store).await;
        assert!(book.is_empty());

        // Writes fail too, but the in-memory list still changes.
        book.add("One".to_string(), "first".to_string()).await.unwrap();
        assert_eq!(book.len(), 1);
    }
}
