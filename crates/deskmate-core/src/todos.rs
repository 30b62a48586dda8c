//! To-do collection with subtasks, persisted as one JSON array.
//!
//! Same storage contract as the notes: load once, overwrite the whole
//! array after each mutation, log and swallow storage failures.

use tracing::{debug, warn};

use crate::error::{DeskmateError, Result};
use crate::models::{SubTask, Todo};
use crate::storage::KeyValueStore;

pub const TODO_KEY: &str = "TODO_DATA";

/// Editor state for creating or editing a to-do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub sub_tasks: Vec<SubTask>,
}

impl TodoDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sub_tasks: Vec::new(),
        }
    }

    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            sub_tasks: todo.sub_tasks.clone(),
        }
    }

    /// Append an open subtask. Blank text is ignored; returns whether
    /// anything was added.
    pub fn add_subtask(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.sub_tasks.push(SubTask::new(text));
        true
    }

    pub fn toggle_subtask(&mut self, id: &str) {
        if let Some(st) = self.sub_tasks.iter_mut().find(|st| st.id == id) {
            st.completed = !st.completed;
        }
    }

    pub fn remove_subtask(&mut self, id: &str) {
        self.sub_tasks.retain(|st| st.id != id);
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(DeskmateError::InvalidInput("To-do title cannot be empty".to_string()));
        }
        if self.sub_tasks.is_empty() {
            return Err(DeskmateError::InvalidInput(
                "A to-do needs at least one subtask".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct TodoList<S> {
    store: S,
    todos: Vec<Todo>,
}

impl<S: KeyValueStore> TodoList<S> {
    /// Read the stored to-dos.
    pub async fn load(store: S) -> Self {
        let todos = match store.get_item(TODO_KEY).await {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Todo>>(&raw).unwrap_or_else(|e| {
                warn!(key = TODO_KEY, error = %e, "ignoring malformed to-dos");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = TODO_KEY, error = %e, "failed to read to-dos");
                Vec::new()
            }
        };

        debug!(count = todos.len(), "loaded to-dos");
        Self { store, todos }
    }

    pub fn list(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// To-dos not yet completed, in stored order.
    pub fn active(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.completed).collect()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a to-do from a draft. New to-dos always start open, even
    /// when every subtask is already ticked.
    pub async fn add(&mut self, draft: TodoDraft) -> Result<Todo> {
        draft.validate()?;

        let todo = Todo::new(draft.title, draft.sub_tasks);
        self.todos.push(todo.clone());
        debug!(id = %todo.id, "added to-do");
        self.persist().await;
        Ok(todo)
    }

    /// Replace title and subtasks; completion rolls up from the subtasks.
    pub async fn update(&mut self, id: &str, draft: TodoDraft) -> Result<Todo> {
        draft.validate()?;

        let todo = self.find_mut(id)?;
        todo.title = draft.title;
        todo.sub_tasks = draft.sub_tasks;
        todo.completed = todo.all_subtasks_completed();
        let updated = todo.clone();

        debug!(id, completed = updated.completed, "updated to-do");
        self.persist().await;
        Ok(updated)
    }

    /// Flip completion of a to-do and all of its subtasks.
    pub async fn toggle_complete(&mut self, id: &str) -> Result<Todo> {
        let todo = self.find_mut(id)?;
        todo.toggle_complete();
        let updated = todo.clone();

        debug!(id, completed = updated.completed, "toggled to-do");
        self.persist().await;
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| DeskmateError::NotFound(format!("to-do {}", id)))?;
        let removed = self.todos.remove(index);

        debug!(id, "deleted to-do");
        self.persist().await;
        Ok(removed)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskmateError::NotFound(format!("to-do {}", id)))
    }

    async fn persist(&self) {
        if let Err(e) = self.try_persist().await {
            warn!(key = TODO_KEY, error = %e, "failed to save to-dos");
        }
    }

    async fn try_persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.todos)?;
        self.store.set_item(TODO_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;

    async fn setup_list() -> TodoList<LocalStore> {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();
        TodoList::load(store).await
    }

    fn draft(title: &str, subtasks: &[&str]) -> TodoDraft {
        let mut draft = TodoDraft::new(title);
        for text in subtasks {
            draft.add_subtask(*text);
        }
        draft
    }

    #[test]
    fn test_draft_ignores_blank_subtask() {
        let mut draft = TodoDraft::new("Trip");
        assert!(!draft.add_subtask("   "));
        assert!(draft.add_subtask("Pack"));
        assert_eq!(draft.sub_tasks.len(), 1);
        assert!(!draft.sub_tasks[0].completed);
    }

    #[test]
    fn test_draft_toggle_and_remove_subtask() {
        let mut draft = draft("Trip", &["Pack", "Book"]);
        let pack = draft.sub_tasks[0].id.clone();

        draft.toggle_subtask(&pack);
        assert!(draft.sub_tasks[0].completed);
        draft.toggle_subtask(&pack);
        assert!(!draft.sub_tasks[0].completed);

        draft.remove_subtask(&pack);
        assert_eq!(draft.sub_tasks.len(), 1);
        assert_eq!(draft.sub_tasks[0].text, "Book");
    }

    #[tokio::test]
    async fn test_malformed_json_loads_empty() {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();

        for raw in ["{not json", r#"[{"id":"1","title":"No subtasks"}]"#] {
            store.set_item(TODO_KEY, raw).await.unwrap();
            let list = TodoList::load(store.clone()).await;
            assert!(list.is_empty(), "loaded to-dos from {raw}");
        }
    }

    #[tokio::test]
    async fn test_add_requires_title_and_subtask() {
        let mut list = setup_list().await;

        let err = list.add(draft(" ", &["Pack"])).await.unwrap_err();
        assert!(matches!(err, DeskmateError::InvalidInput(_)));

        let err = list.add(draft("Trip", &[])).await.unwrap_err();
        assert!(matches!(err, DeskmateError::InvalidInput(_)));

        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_add_starts_open() {
        let mut list = setup_list().await;
        let mut d = draft("Trip", &["Pack"]);
        let id = d.sub_tasks[0].id.clone();
        d.toggle_subtask(&id);

        let todo = list.add(d).await.unwrap();
        assert!(!todo.completed);
        assert_eq!(list.active().len(), 1);
    }

    #[tokio::test]
    async fn test_update_rolls_up_completion() {
        let mut list = setup_list().await;
        let todo = list.add(draft("Trip", &["Pack", "Book"])).await.unwrap();

        let mut edit = TodoDraft::from_todo(&todo);
        let first = edit.sub_tasks[0].id.clone();
        edit.toggle_subtask(&first);
        let updated = list.update(&todo.id, edit.clone()).await.unwrap();
        assert!(!updated.completed);

        let second = edit.sub_tasks[1].id.clone();
        edit.toggle_subtask(&second);
        let updated = list.update(&todo.id, edit).await.unwrap();
        assert!(updated.completed);
        assert_eq!(list.completed().len(), 1);
        assert!(list.active().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_complete_propagates_to_subtasks() {
        let mut list = setup_list().await;
        let todo = list.add(draft("Trip", &["Pack", "Book"])).await.unwrap();

        let done = list.toggle_complete(&todo.id).await.unwrap();
        assert!(done.completed);
        assert!(done.sub_tasks.iter().all(|st| st.completed));

        let reopened = list.toggle_complete(&todo.id).await.unwrap();
        assert!(!reopened.completed);
        assert!(reopened.sub_tasks.iter().all(|st| !st.completed));
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let mut list = setup_list().await;
        assert!(matches!(
            list.toggle_complete("nope").await.unwrap_err(),
            DeskmateError::NotFound(_)
        ));
        assert!(matches!(
            list.delete("nope").await.unwrap_err(),
            DeskmateError::NotFound(_)
        ));
        assert!(matches!(
            list.update("nope", draft("T", &["s"])).await.unwrap_err(),
            DeskmateError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_delete_persists() {
        let mut list = setup_list().await;
        let keep = list.add(draft("Keep", &["a"])).await.unwrap();
        let gone = list.add(draft("Gone", &["b"])).await.unwrap();

        list.delete(&gone.id).await.unwrap();

        let raw = list.store().get_item(TODO_KEY).await.unwrap().unwrap();
        let stored: Vec<Todo> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![keep]);
    }
}
