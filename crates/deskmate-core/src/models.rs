use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fresh opaque record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Note {
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: new_id(),
            title,
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl SubTask {
    pub fn new(text: String) -> Self {
        Self {
            id: new_id(),
            text,
            completed: false,
        }
    }
}

/// A titled to-do item with its ordered subtasks.
///
/// Serialized with the `subTasks` field name used by the stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub sub_tasks: Vec<SubTask>,
    pub completed: bool,
}

impl Todo {
    pub fn new(title: String, sub_tasks: Vec<SubTask>) -> Self {
        Self {
            id: new_id(),
            title,
            sub_tasks,
            completed: false,
        }
    }

    /// True when every subtask is done. An empty subtask list counts as done.
    pub fn all_subtasks_completed(&self) -> bool {
        self.sub_tasks.iter().all(|st| st.completed)
    }

    /// Flip completion and push the new value down to every subtask.
    pub fn toggle_complete(&mut self) {
        let completed = !self.completed;
        self.completed = completed;
        for st in &mut self.sub_tasks {
            st.completed = completed;
        }
    }

    pub fn completed_count(&self) -> usize {
        self.sub_tasks.iter().filter(|st| st.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new_assigns_id() {
        let a = Note::new("Groceries".to_string(), "milk, eggs".to_string());
        let b = Note::new("Groceries".to_string(), "milk, eggs".to_string());

        assert_eq!(a.title, "Groceries");
        assert_eq!(a.content, "milk, eggs");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_todo_serializes_with_camel_case_subtasks() {
        let todo = Todo {
            id: "1".to_string(),
            title: "Trip".to_string(),
            sub_tasks: vec![SubTask {
                id: "2".to_string(),
                text: "Pack".to_string(),
                completed: true,
            }],
            completed: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "Trip",
                "subTasks": [{"id": "2", "text": "Pack", "completed": true}],
                "completed": false
            })
        );
    }

    #[test]
    fn test_todo_toggle_complete_propagates() {
        let mut todo = Todo::new(
            "Trip".to_string(),
            vec![SubTask::new("Pack".to_string()), SubTask::new("Book".to_string())],
        );
        todo.sub_tasks[0].completed = true;

        todo.toggle_complete();
        assert!(todo.completed);
        assert!(todo.sub_tasks.iter().all(|st| st.completed));

        todo.toggle_complete();
        assert!(!todo.completed);
        assert!(todo.sub_tasks.iter().all(|st| !st.completed));
    }

    #[test]
    fn test_all_subtasks_completed() {
        let mut todo = Todo::new("Trip".to_string(), vec![SubTask::new("Pack".to_string())]);
        assert!(!todo.all_subtasks_completed());
        assert_eq!(todo.completed_count(), 0);

        todo.sub_tasks[0].completed = true;
        assert!(todo.all_subtasks_completed());
        assert_eq!(todo.completed_count(), 1);
    }
}
