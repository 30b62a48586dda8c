use deskmate_core::hand_angle;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::app::{App, Mode, PendingDelete, Screen};
use super::widgets::{
    ClockWidget, ConfirmWidget, LapListWidget, NoteDetailWidget, NoteEditorWidget,
    TodoEditorWidget,
};

/// Main UI rendering function
pub fn render(app: &App, frame: &mut Frame) {
    frame.render_widget(Block::default().style(app.theme.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help line
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    match app.screen {
        Screen::Home => render_home(app, frame, chunks[1]),
        Screen::Stopwatch => render_stopwatch(app, frame, chunks[1]),
        Screen::Notes => render_notes(app, frame, chunks[1]),
        Screen::Todos => render_todos(app, frame, chunks[1]),
    }

    render_status(app, frame, chunks[2]);
    render_help(app, frame, chunks[3]);

    // Modals
    match app.mode {
        Mode::Help => render_help_modal(app, frame),
        Mode::ViewingNote => {
            if let Some(note) = app.selected_note() {
                let area = centered_rect(70, 80, frame.area());
                NoteDetailWidget::new(note, &app.theme).render(frame, area);
            }
        }
        Mode::EditingNote => {
            if let Some(editor) = &app.note_editor {
                let area = centered_rect(70, 60, frame.area());
                NoteEditorWidget::new(editor, &app.theme).render(frame, area);
            }
        }
        Mode::EditingTodo => {
            if let Some(editor) = &app.todo_editor {
                let area = centered_rect(70, 80, frame.area());
                TodoEditorWidget::new(editor, &app.theme).render(frame, area);
            }
        }
        Mode::ConfirmDelete => {
            if let Some(pending) = &app.pending_delete {
                let message = match pending {
                    PendingDelete::Note { title, .. } => format!("Delete note \"{}\"?", title),
                    PendingDelete::Todo { title, .. } => format!("Delete to-do \"{}\"?", title),
                };
                let area = centered_rect(50, 30, frame.area());
                ConfirmWidget::new(message, &app.theme).render(frame, area);
            }
        }
        Mode::Normal => {}
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(" deskmate ", app.theme.title_style())];
    if app.screen != Screen::Home {
        spans.push(Span::styled("/ ", app.theme.hint_style()));
        spans.push(Span::raw(app.screen.label()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(app.theme.border_style(false)),
    );
    frame.render_widget(header, area);
}

fn render_home(app: &App, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(7),
            Constraint::Min(0),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    for (i, screen) in Screen::TOOLS.iter().enumerate() {
        let selected = i == app.home_selected;
        let label_style = if selected {
            app.theme.selected_style()
        } else {
            app.theme.panel()
        };

        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {} ", screen.label()), label_style)),
        ])
        .alignment(Alignment::Center)
        .style(app.theme.panel())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(selected)),
        );
        frame.render_widget(card, cards[i]);
    }
}

fn render_stopwatch(app: &App, frame: &mut Frame, area: Rect) {
    let Some(watch) = &app.stopwatch else {
        return;
    };
    let state = watch.snapshot();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(columns[0]);

    ClockWidget::new(hand_angle(&state), &app.theme).render(frame, left[0]);

    let status = if state.is_running { "running" } else { "stopped" };
    let time = Paragraph::new(Line::from(vec![
        Span::styled(
            state.formatted(),
            app.theme.title_style().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", status), app.theme.hint_style()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(state.is_running)),
    );
    frame.render_widget(time, left[1]);

    LapListWidget::new(&state.laps, &app.theme).render(frame, columns[1]);
}

fn render_notes(app: &App, frame: &mut Frame, area: Rect) {
    let notes = app.note_list();

    let items: Vec<ListItem> = if notes.is_empty() {
        vec![ListItem::new(Span::styled(
            "No notes yet. Press 'a' to add one.",
            app.theme.hint_style(),
        ))]
    } else {
        notes
            .iter()
            .map(|note| {
                let preview = note.content.lines().next().unwrap_or("");
                ListItem::new(vec![
                    Line::from(Span::styled(note.title.as_str(), app.theme.panel())),
                    Line::from(Span::styled(format!("  {}", preview), app.theme.hint_style())),
                ])
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Notes ({}) ", notes.len()))
                .title_style(app.theme.title_style())
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true)),
        )
        .highlight_style(app.theme.selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !notes.is_empty() {
        state.select(Some(app.note_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_todos(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let (active_count, completed_count) = app
        .todos
        .as_ref()
        .map(|list| (list.active().len(), list.completed().len()))
        .unwrap_or((0, 0));

    let tab_style = |on: bool| {
        if on {
            app.theme.title_style().add_modifier(Modifier::UNDERLINED)
        } else {
            app.theme.hint_style()
        }
    };
    let tabs = Paragraph::new(Line::from(vec![
        Span::styled(format!(" Active ({}) ", active_count), tab_style(!app.show_completed)),
        Span::raw("  "),
        Span::styled(
            format!(" Completed ({}) ", completed_count),
            tab_style(app.show_completed),
        ),
    ]));
    frame.render_widget(tabs, chunks[0]);

    let todos = app.visible_todos();
    let items: Vec<ListItem> = if todos.is_empty() {
        let hint = if app.show_completed {
            "Nothing completed yet."
        } else {
            "No to-dos. Press 'a' to add one."
        };
        vec![ListItem::new(Span::styled(hint, app.theme.hint_style()))]
    } else {
        todos
            .iter()
            .map(|todo| {
                let (check, style) = if todo.completed {
                    ("[x] ", app.theme.completed_style())
                } else {
                    ("[ ] ", app.theme.panel())
                };
                ListItem::new(Line::from(vec![
                    Span::raw(check),
                    Span::styled(todo.title.as_str(), style),
                    Span::styled(
                        format!("  {}/{}", todo.completed_count(), todo.sub_tasks.len()),
                        app.theme.hint_style(),
                    ),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true)),
        )
        .highlight_style(app.theme.selected_style())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !todos.is_empty() {
        state.select(Some(app.todo_selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let text = app.status_message.as_deref().unwrap_or("");
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", text), app.theme.title_style())),
        area,
    );
}

fn render_help(app: &App, frame: &mut Frame, area: Rect) {
    let help = match (app.mode, app.screen) {
        (Mode::Normal, Screen::Home) => "←/→: select  Enter: open  ?: help  q: quit",
        (Mode::Normal, Screen::Stopwatch) => "Space: start/stop  l: lap  c: clear  Esc: home",
        (Mode::Normal, Screen::Notes) => {
            "j/k: move  a: add  e: edit  Enter: view  x: delete  Esc: home"
        }
        (Mode::Normal, Screen::Todos) => {
            "j/k: move  Tab: active/completed  a: add  e: edit  Space: done  x: delete  Esc: home"
        }
        (Mode::ConfirmDelete, _) => "y: delete  any other key: cancel",
        _ => "Esc: close",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", help), app.theme.hint_style())),
        area,
    );
}

fn render_help_modal(app: &App, frame: &mut Frame) {
    let area = centered_rect(60, 80, frame.area());
    let heading = |text: &'static str| Line::from(Span::styled(text, app.theme.title_style()));

    let help_text = vec![
        heading("Keyboard Shortcuts"),
        Line::from(""),
        heading("Home"),
        Line::from("  ←/→ h/l     Select tool"),
        Line::from("  Enter       Open tool"),
        Line::from("  q           Quit"),
        Line::from(""),
        heading("StopWatch"),
        Line::from("  Space       Start / stop"),
        Line::from("  l           Record lap"),
        Line::from("  c           Clear time and laps"),
        Line::from(""),
        heading("Notes"),
        Line::from("  a / e       Add / edit note"),
        Line::from("  Enter       Read note"),
        Line::from("  x           Delete note"),
        Line::from(""),
        heading("To-Do List"),
        Line::from("  Tab         Active / completed"),
        Line::from("  a / e       Add / edit to-do"),
        Line::from("  Space       Toggle complete"),
        Line::from("  x           Delete to-do"),
        Line::from(""),
        heading("Everywhere"),
        Line::from("  Esc         Back / cancel"),
        Line::from("  Ctrl+S      Save editor"),
        Line::from("  ?           This help"),
    ];

    frame.render_widget(Clear, area);
    let help = Paragraph::new(help_text).style(app.theme.panel()).block(
        Block::default()
            .title(" Help (press any key to close) ")
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(true)),
    );
    frame.render_widget(help, area);
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::theme::Theme;
    use deskmate_core::LocalStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(50, 50, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 25);
        assert_eq!(inner.x, 25);
    }

    #[tokio::test]
    async fn test_stopwatch_screen_shows_time() {
        let store = LocalStore::new_in_memory().await.unwrap();
        store.run_migrations().await.unwrap();
        let mut app = App::with_store(store, Theme::dark());
        app.enter_screen(Screen::Stopwatch).await;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("00 : 00"));
        assert!(text.contains("No laps yet"));
    }
}
