use anyhow::Result;
use deskmate_core::{Config, LocalStore, Note, NotesBook, Stopwatch, Todo, TodoDraft, TodoList};
use tui_input::Input;

use super::theme::Theme;
use crate::commands::open_store;

/// Top-level screens reachable from the home grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Stopwatch,
    Notes,
    Todos,
}

impl Screen {
    /// Tools shown on the home grid, in grid order
    pub const TOOLS: [Screen; 3] = [Screen::Stopwatch, Screen::Notes, Screen::Todos];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Stopwatch => "StopWatch",
            Screen::Notes => "Notes",
            Screen::Todos => "To-Do List",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode
    Normal,
    /// Adding or editing a note
    EditingNote,
    /// Reading a note
    ViewingNote,
    /// Adding or editing a to-do
    EditingTodo,
    /// Waiting for y/n on a delete
    ConfirmDelete,
    /// Showing help
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    Title,
    Content,
}

/// Note add/edit form
pub struct NoteEditor {
    /// `None` while adding
    pub id: Option<String>,
    pub title: Input,
    pub content: Input,
    pub field: NoteField,
}

impl NoteEditor {
    pub fn new() -> Self {
        Self {
            id: None,
            title: Input::default(),
            content: Input::default(),
            field: NoteField::Title,
        }
    }

    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: Input::new(note.title.clone()),
            content: Input::new(note.content.clone()),
            field: NoteField::Title,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            NoteField::Title => NoteField::Content,
            NoteField::Content => NoteField::Title,
        };
    }

    pub fn active_input(&mut self) -> &mut Input {
        match self.field {
            NoteField::Title => &mut self.title,
            NoteField::Content => &mut self.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoField {
    Title,
    NewSubtask,
    Subtasks,
}

/// To-do add/edit form
pub struct TodoEditor {
    /// `None` while adding
    pub id: Option<String>,
    pub title: Input,
    pub subtask: Input,
    pub draft: TodoDraft,
    pub field: TodoField,
    /// Highlighted row in the subtask list
    pub selected: usize,
}

impl TodoEditor {
    pub fn new() -> Self {
        Self {
            id: None,
            title: Input::default(),
            subtask: Input::default(),
            draft: TodoDraft::default(),
            field: TodoField::Title,
            selected: 0,
        }
    }

    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: Some(todo.id.clone()),
            title: Input::new(todo.title.clone()),
            subtask: Input::default(),
            draft: TodoDraft::from_todo(todo),
            field: TodoField::Title,
            selected: 0,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            TodoField::Title => TodoField::NewSubtask,
            TodoField::NewSubtask if self.draft.sub_tasks.is_empty() => TodoField::Title,
            TodoField::NewSubtask => TodoField::Subtasks,
            TodoField::Subtasks => TodoField::Title,
        };
    }

    /// Move the typed subtask text into the draft.
    pub fn commit_subtask(&mut self) {
        if self.draft.add_subtask(self.subtask.value()) {
            self.subtask.reset();
        }
    }

    pub fn select_next(&mut self) {
        if self.selected < self.draft.sub_tasks.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.draft.sub_tasks.get(self.selected).map(|st| st.id.clone()) {
            self.draft.toggle_subtask(&id);
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.draft.sub_tasks.get(self.selected).map(|st| st.id.clone()) {
            self.draft.remove_subtask(&id);
        }
        if self.selected >= self.draft.sub_tasks.len() {
            self.selected = self.draft.sub_tasks.len().saturating_sub(1);
        }
        if self.draft.sub_tasks.is_empty() {
            self.field = TodoField::NewSubtask;
        }
    }

    /// Draft with the current title applied.
    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.value().to_string(),
            sub_tasks: self.draft.sub_tasks.clone(),
        }
    }
}

/// Record awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Note { id: String, title: String },
    Todo { id: String, title: String },
}

/// Application state
pub struct App {
    /// Is the app running?
    pub running: bool,
    pub screen: Screen,
    pub mode: Mode,
    /// Highlighted tool on the home grid
    pub home_selected: usize,
    pub theme: Theme,
    /// Status message to display
    pub status_message: Option<String>,
    store: LocalStore,

    /// Present only while the stopwatch screen is open
    pub stopwatch: Option<Stopwatch>,

    /// Loaded when the notes screen opens
    pub notes: Option<NotesBook<LocalStore>>,
    pub note_selected: usize,
    pub note_editor: Option<NoteEditor>,

    /// Loaded when the to-do screen opens
    pub todos: Option<TodoList<LocalStore>>,
    pub todo_selected: usize,
    pub show_completed: bool,
    pub todo_editor: Option<TodoEditor>,

    pub pending_delete: Option<PendingDelete>,
}

impl App {
    /// Create a new application instance
    pub async fn new(config: Config) -> Result<Self> {
        let store = open_store(&config).await?;
        Ok(Self::with_store(store, Theme::for_scheme(config.display.theme)))
    }

    pub fn with_store(store: LocalStore, theme: Theme) -> Self {
        Self {
            running: true,
            screen: Screen::Home,
            mode: Mode::Normal,
            home_selected: 0,
            theme,
            status_message: None,
            store,
            stopwatch: None,
            notes: None,
            note_selected: 0,
            note_editor: None,
            todos: None,
            todo_selected: 0,
            show_completed: false,
            todo_editor: None,
            pending_delete: None,
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Switch screens. The screen being left discards its state; the
    /// screen being entered builds or loads fresh state.
    pub async fn enter_screen(&mut self, screen: Screen) {
        self.leave_screen();
        self.screen = screen;

        match screen {
            Screen::Home => {}
            Screen::Stopwatch => self.stopwatch = Some(Stopwatch::new()),
            Screen::Notes => {
                self.notes = Some(NotesBook::load(self.store.clone()).await);
                self.note_selected = 0;
            }
            Screen::Todos => {
                self.todos = Some(TodoList::load(self.store.clone()).await);
                self.todo_selected = 0;
                self.show_completed = false;
            }
        }
        tracing::debug!(screen = screen.label(), "entered screen");
    }

    fn leave_screen(&mut self) {
        // Dropping the stopwatch cancels its tick task.
        self.stopwatch = None;
        self.notes = None;
        self.todos = None;
        self.note_editor = None;
        self.todo_editor = None;
        self.pending_delete = None;
        self.mode = Mode::Normal;
    }

    // Home grid

    pub fn home_next(&mut self) {
        self.home_selected = (self.home_selected + 1) % Screen::TOOLS.len();
    }

    pub fn home_previous(&mut self) {
        self.home_selected = (self.home_selected + Screen::TOOLS.len() - 1) % Screen::TOOLS.len();
    }

    pub async fn open_selected_tool(&mut self) {
        let screen = Screen::TOOLS[self.home_selected];
        self.enter_screen(screen).await;
    }

    // Stopwatch

    pub fn toggle_stopwatch(&mut self) {
        if let Some(watch) = self.stopwatch.as_mut() {
            watch.toggle();
        }
    }

    pub fn lap_stopwatch(&mut self) {
        if let Some(watch) = self.stopwatch.as_mut() {
            let entry = watch.lap();
            self.status_message = Some(format!("Lap {}", entry));
        }
    }

    pub fn clear_stopwatch(&mut self) {
        if let Some(watch) = self.stopwatch.as_mut() {
            watch.clear();
        }
    }

    // Notes

    pub fn note_list(&self) -> &[Note] {
        self.notes.as_ref().map(|b| b.list()).unwrap_or(&[])
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.note_list().get(self.note_selected)
    }

    pub fn select_next_note(&mut self) {
        if self.note_selected < self.note_list().len().saturating_sub(1) {
            self.note_selected += 1;
        }
    }

    pub fn select_previous_note(&mut self) {
        self.note_selected = self.note_selected.saturating_sub(1);
    }

    pub fn open_note_editor(&mut self, existing: bool) {
        let editor = if existing {
            match self.selected_note() {
                Some(note) => NoteEditor::from_note(note),
                None => return,
            }
        } else {
            NoteEditor::new()
        };
        self.note_editor = Some(editor);
        self.mode = Mode::EditingNote;
    }

    pub fn view_selected_note(&mut self) {
        if self.selected_note().is_some() {
            self.mode = Mode::ViewingNote;
        }
    }

    /// Save the open editor. Invalid input keeps the editor open.
    pub async fn save_note_editor(&mut self) {
        let (Some(editor), Some(book)) = (self.note_editor.as_ref(), self.notes.as_mut()) else {
            return;
        };

        let title = editor.title.value().to_string();
        let content = editor.content.value().to_string();
        let result = match editor.id.as_deref() {
            Some(id) => book.update(id, title, content).await,
            None => book.add(title, content).await,
        };

        match result {
            Ok(note) => {
                self.status_message = Some(format!("\u{2713} Saved: {}", note.title));
                if let Some(i) = book.list().iter().position(|n| n.id == note.id) {
                    self.note_selected = i;
                }
                self.note_editor = None;
                self.mode = Mode::Normal;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn cancel_note_editor(&mut self) {
        self.note_editor = None;
        self.mode = Mode::Normal;
    }

    pub fn request_delete_note(&mut self) {
        if let Some(note) = self.selected_note() {
            self.pending_delete = Some(PendingDelete::Note {
                id: note.id.clone(),
                title: note.title.clone(),
            });
            self.mode = Mode::ConfirmDelete;
        }
    }

    // To-dos

    /// Active or completed to-dos, depending on the current tab.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        match &self.todos {
            Some(list) if self.show_completed => list.completed(),
            Some(list) => list.active(),
            None => Vec::new(),
        }
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.visible_todos().get(self.todo_selected).copied()
    }

    pub fn select_next_todo(&mut self) {
        if self.todo_selected < self.visible_todos().len().saturating_sub(1) {
            self.todo_selected += 1;
        }
    }

    pub fn select_previous_todo(&mut self) {
        self.todo_selected = self.todo_selected.saturating_sub(1);
    }

    pub fn toggle_show_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.todo_selected = 0;
    }

    fn clamp_todo_selection(&mut self) {
        let len = self.visible_todos().len();
        if self.todo_selected >= len {
            self.todo_selected = len.saturating_sub(1);
        }
    }

    pub fn open_todo_editor(&mut self, existing: bool) {
        let editor = if existing {
            match self.selected_todo() {
                Some(todo) if todo.completed => {
                    self.status_message = Some("Completed to-dos cannot be edited".to_string());
                    return;
                }
                Some(todo) => TodoEditor::from_todo(todo),
                None => return,
            }
        } else {
            TodoEditor::new()
        };
        self.todo_editor = Some(editor);
        self.mode = Mode::EditingTodo;
    }

    /// Save the open editor. Invalid input keeps the editor open.
    pub async fn save_todo_editor(&mut self) {
        let (Some(editor), Some(list)) = (self.todo_editor.as_ref(), self.todos.as_mut()) else {
            return;
        };

        let draft = editor.to_draft();
        let result = match editor.id.as_deref() {
            Some(id) => list.update(id, draft).await,
            None => list.add(draft).await,
        };

        match result {
            Ok(todo) => {
                self.status_message = Some(format!("\u{2713} Saved: {}", todo.title));
                self.todo_editor = None;
                self.mode = Mode::Normal;
                self.clamp_todo_selection();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn cancel_todo_editor(&mut self) {
        self.todo_editor = None;
        self.mode = Mode::Normal;
    }

    pub async fn toggle_selected_todo(&mut self) {
        let Some(id) = self.selected_todo().map(|t| t.id.clone()) else {
            return;
        };
        if let Some(list) = self.todos.as_mut() {
            match list.toggle_complete(&id).await {
                Ok(todo) if todo.completed => {
                    self.status_message = Some(format!("\u{2713} Completed: {}", todo.title));
                }
                Ok(todo) => self.status_message = Some(format!("Reopened: {}", todo.title)),
                Err(e) => self.status_message = Some(e.to_string()),
            }
        }
        self.clamp_todo_selection();
    }

    pub fn request_delete_todo(&mut self) {
        if let Some(todo) = self.selected_todo() {
            self.pending_delete = Some(PendingDelete::Todo {
                id: todo.id.clone(),
                title: todo.title.clone(),
            });
            self.mode = Mode::ConfirmDelete;
        }
    }

    // Delete confirmation

    pub async fn confirm_delete(&mut self) {
        let result = match self.pending_delete.take() {
            Some(PendingDelete::Note { id, .. }) => match self.notes.as_mut() {
                Some(book) => book.delete(&id).await.map(|n| n.title),
                None => return,
            },
            Some(PendingDelete::Todo { id, .. }) => match self.todos.as_mut() {
                Some(list) => list.delete(&id).await.map(|t| t.title),
                None => return,
            },
            None => return,
        };

        self.status_message = Some(match result {
            Ok(title) => format!("\u{2717} Deleted: {}", title),
            Err(e) => e.to_string(),
        });
        self.mode = Mode::Normal;

        let notes_len = self.note_list().len();
        if self.note_selected >= notes_len {
            self.note_selected = notes_len.saturating_sub(1);
        }
        self.clamp_todo_selection();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Normal;
    }
}
