use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;
use tui_input::backend::crossterm::EventHandler as InputHandler;

use super::app::{App, Mode, NoteField, Screen, TodoField};

/// Handle key events and update app state
pub async fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Clear status message on any key press
    app.status_message = None;

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key).await,
        Mode::EditingNote => handle_note_editor(app, key).await,
        Mode::ViewingNote => handle_viewing_note(app, key),
        Mode::EditingTodo => handle_todo_editor(app, key).await,
        Mode::ConfirmDelete => handle_confirm_delete(app, key).await,
        Mode::Help => app.mode = Mode::Normal,
    }

    Ok(())
}

fn is_save(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s')
}

async fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') => {
            app.mode = Mode::Help;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        _ => {}
    }

    match app.screen {
        Screen::Home => handle_home(app, key).await,
        Screen::Stopwatch => handle_stopwatch(app, key).await,
        Screen::Notes => handle_notes(app, key).await,
        Screen::Todos => handle_todos(app, key).await,
    }
}

async fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
            app.home_next()
        }
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
            app.home_previous()
        }
        KeyCode::Enter => app.open_selected_tool().await,
        _ => {}
    }
}

async fn handle_stopwatch(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => app.toggle_stopwatch(),
        KeyCode::Char('l') => app.lap_stopwatch(),
        KeyCode::Char('c') => app.clear_stopwatch(),
        KeyCode::Esc => app.enter_screen(Screen::Home).await,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

async fn handle_notes(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_note(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_note(),
        KeyCode::Char('a') => app.open_note_editor(false),
        KeyCode::Char('e') => app.open_note_editor(true),
        KeyCode::Enter => app.view_selected_note(),
        KeyCode::Char('x') => app.request_delete_note(),
        KeyCode::Esc => app.enter_screen(Screen::Home).await,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

async fn handle_todos(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_todo(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous_todo(),
        KeyCode::Tab => app.toggle_show_completed(),
        KeyCode::Char('a') => app.open_todo_editor(false),
        KeyCode::Char('e') => app.open_todo_editor(true),
        KeyCode::Char(' ') => app.toggle_selected_todo().await,
        KeyCode::Char('x') => app.request_delete_todo(),
        KeyCode::Esc => app.enter_screen(Screen::Home).await,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

fn handle_viewing_note(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.mode = Mode::Normal,
        KeyCode::Char('e') => app.open_note_editor(true),
        _ => {}
    }
}

async fn handle_note_editor(app: &mut App, key: KeyEvent) {
    if is_save(&key) {
        app.save_note_editor().await;
        return;
    }

    let Some(editor) = app.note_editor.as_mut() else {
        app.mode = Mode::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc => app.cancel_note_editor(),
        KeyCode::Tab | KeyCode::BackTab => editor.next_field(),
        KeyCode::Enter if editor.field == NoteField::Title => editor.next_field(),
        // Note bodies are multiline; saving is Ctrl+S
        KeyCode::Enter => {
            editor.content.handle(InputRequest::InsertChar('\n'));
        }
        _ => {
            editor
                .active_input()
                .handle_event(&crossterm::event::Event::Key(key));
        }
    }
}

async fn handle_todo_editor(app: &mut App, key: KeyEvent) {
    if is_save(&key) {
        app.save_todo_editor().await;
        return;
    }

    let Some(editor) = app.todo_editor.as_mut() else {
        app.mode = Mode::Normal;
        return;
    };

    if key.code == KeyCode::Esc {
        app.cancel_todo_editor();
        return;
    }
    if key.code == KeyCode::Tab {
        editor.next_field();
        return;
    }

    match editor.field {
        TodoField::Title => match key.code {
            KeyCode::Enter => editor.field = TodoField::NewSubtask,
            _ => {
                editor.title.handle_event(&crossterm::event::Event::Key(key));
            }
        },
        TodoField::NewSubtask => match key.code {
            // Enter on an empty line saves the whole to-do
            KeyCode::Enter if editor.subtask.value().trim().is_empty() => {
                app.save_todo_editor().await
            }
            KeyCode::Enter => editor.commit_subtask(),
            _ => {
                editor
                    .subtask
                    .handle_event(&crossterm::event::Event::Key(key));
            }
        },
        TodoField::Subtasks => match key.code {
            KeyCode::Char('j') | KeyCode::Down => editor.select_next(),
            KeyCode::Char('k') | KeyCode::Up => editor.select_previous(),
            KeyCode::Char(' ') | KeyCode::Enter => editor.toggle_selected(),
            KeyCode::Char('x') | KeyCode::Delete => editor.remove_selected(),
            _ => {}
        },
    }
}

async fn handle_confirm_delete(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete().await,
        _ => app.cancel_delete(),
    }
}
