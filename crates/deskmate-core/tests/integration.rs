//! Integration tests for the deskmate-core crate.
//!
//! These tests cover persistence across reopened stores, storage
//! failures that must stay invisible to callers, and a full stopwatch
//! session on paused time.

use std::time::Duration;

use deskmate_core::{
    DeskmateError, KeyValueStore, LocalStore, NOTES_KEY, NotesBook, Result, Stopwatch,
    StopwatchState, TODO_KEY, TodoDraft, TodoList,
};
use tokio_test::assert_ok;

/// Store whose every call fails, standing in for an unavailable backend.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Err(DeskmateError::NotFound(key.to_string()))
    }

    async fn set_item(&self, key: &str, _value: &str) -> Result<()> {
        Err(DeskmateError::NotFound(key.to_string()))
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        Err(DeskmateError::NotFound(key.to_string()))
    }
}

async fn open_file_store(path: &std::path::Path) -> LocalStore {
    let store = LocalStore::new(path).await.unwrap();
    store.run_migrations().await.unwrap();
    store
}

#[tokio::test]
async fn test_notes_round_trip_through_reopened_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    let expected = {
        let mut book = NotesBook::load(open_file_store(&path).await).await;
        assert_ok!(book.add("Groceries".to_string(), "milk\neggs".to_string()).await);
        let second = book.add("Ideas".to_string(), "ünïcödé ✓".to_string()).await.unwrap();
        assert_ok!(book.add("Books".to_string(), "Dune".to_string()).await);
        assert_ok!(book
            .update(&second.id, "Ideas v2".to_string(), "more".to_string())
            .await);
        book.list().to_vec()
    };

    let reopened = NotesBook::load(open_file_store(&path).await).await;
    assert_eq!(reopened.list(), expected.as_slice());
    assert_eq!(reopened.list()[1].title, "Ideas v2");
}

#[tokio::test]
async fn test_todos_round_trip_through_reopened_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    let (expected, done_id) = {
        let mut list = TodoList::load(open_file_store(&path).await).await;

        let mut trip = TodoDraft::new("Trip");
        trip.add_subtask("Pack");
        trip.add_subtask("Book hotel");
        let trip = list.add(trip).await.unwrap();

        let mut chores = TodoDraft::new("Chores");
        chores.add_subtask("Dishes");
        assert_ok!(list.add(chores).await);

        assert_ok!(list.toggle_complete(&trip.id).await);
        (list.list().to_vec(), trip.id)
    };

    let reopened = TodoList::load(open_file_store(&path).await).await;
    assert_eq!(reopened.list(), expected.as_slice());
    assert_eq!(reopened.completed().len(), 1);
    assert_eq!(reopened.completed()[0].id, done_id);
    assert_eq!(reopened.active().len(), 1);
}

#[tokio::test]
async fn test_collections_use_separate_keys() {
    let store = LocalStore::new_in_memory().await.unwrap();
    store.run_migrations().await.unwrap();

    let mut book = NotesBook::load(store.clone()).await;
    book.add("Note".to_string(), "body".to_string()).await.unwrap();

    let mut list = TodoList::load(store.clone()).await;
    let mut draft = TodoDraft::new("Todo");
    draft.add_subtask("step");
    list.add(draft).await.unwrap();

    assert_eq!(
        store.keys().await.unwrap(),
        vec![NOTES_KEY.to_string(), TODO_KEY.to_string()]
    );
}

#[tokio::test]
async fn test_reads_camel_case_todo_json() {
    let store = LocalStore::new_in_memory().await.unwrap();
    store.run_migrations().await.unwrap();
    store
        .set_item(
            TODO_KEY,
            r#"[{"id":"1718000000000","title":"Trip","subTasks":[{"id":"1718000000001","text":"Pack","completed":true}],"completed":true}]"#,
        )
        .await
        .unwrap();

    let list = TodoList::load(store).await;
    let todo = list.get("1718000000000").unwrap();
    assert_eq!(todo.sub_tasks[0].text, "Pack");
    assert!(todo.completed);
}

#[tokio::test]
async fn test_broken_store_is_invisible_to_callers() {
    let mut book = NotesBook::load(BrokenStore).await;
    assert!(book.is_empty());

    let note = book.add("Kept".to_string(), "in memory".to_string()).await.unwrap();
    assert_eq!(book.get(&note.id).unwrap().title, "Kept");

    let mut list = TodoList::load(BrokenStore).await;
    let mut draft = TodoDraft::new("Kept");
    draft.add_subtask("too");
    let todo = list.add(draft).await.unwrap();
    assert!(list.delete(&todo.id).await.is_ok());
    assert!(list.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stopwatch_session() {
    let mut watch = Stopwatch::new();

    watch.toggle();
    tokio::time::sleep(Duration::from_millis(65_500)).await;
    assert_eq!(watch.lap(), "01 : 05");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(watch.lap(), "02 : 05");

    watch.toggle();
    tokio::time::sleep(Duration::from_secs(30)).await;
    let paused = watch.snapshot();
    assert!(!paused.is_running);
    assert_eq!(paused.elapsed_seconds, 125);
    assert_eq!(paused.laps, vec!["01 : 05".to_string(), "02 : 05".to_string()]);

    watch.clear();
    assert_eq!(watch.snapshot(), StopwatchState::new());
}
