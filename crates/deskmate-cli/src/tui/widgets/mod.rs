pub mod clock;
pub mod confirm;
pub mod lap_list;
pub mod note_detail;
pub mod note_editor;
pub mod todo_editor;

pub use clock::ClockWidget;
pub use confirm::ConfirmWidget;
pub use lap_list::LapListWidget;
pub use note_detail::NoteDetailWidget;
pub use note_editor::NoteEditorWidget;
pub use todo_editor::TodoEditorWidget;
