pub mod config;
pub mod error;
pub mod models;
pub mod notes;
pub mod stopwatch;
pub mod storage;
pub mod todos;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig, Theme};
pub use error::{DeskmateError, Result};
pub use models::*;
pub use notes::{NOTES_KEY, NotesBook};
pub use stopwatch::{PeriodicTask, Stopwatch, StopwatchState, format_elapsed, hand_angle};
pub use storage::{KeyValueStore, LocalStore};
pub use todos::{TODO_KEY, TodoDraft, TodoList};
