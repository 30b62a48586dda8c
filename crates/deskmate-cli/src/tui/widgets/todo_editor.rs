use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::tui::app::{TodoEditor, TodoField};
use crate::tui::theme::Theme;

pub struct TodoEditorWidget<'a> {
    editor: &'a TodoEditor,
    theme: &'a Theme,
}

impl<'a> TodoEditorWidget<'a> {
    pub fn new(editor: &'a TodoEditor, theme: &'a Theme) -> Self {
        Self { editor, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let title = if self.editor.id.is_some() {
            " Edit To-Do (Tab: next field, Ctrl+S: save, Esc: cancel) "
        } else {
            " New To-Do (Tab: next field, Ctrl+S: save, Esc: cancel) "
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true))
            .style(self.theme.panel());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // New subtask
                Constraint::Min(3),    // Subtasks
                Constraint::Length(1), // Hints
            ])
            .split(inner);

        self.render_field(
            frame,
            chunks[0],
            "Title",
            self.editor.title.value(),
            self.editor.field == TodoField::Title,
        );
        self.render_field(
            frame,
            chunks[1],
            "Add subtask (Enter: add, Enter on empty: save)",
            self.editor.subtask.value(),
            self.editor.field == TodoField::NewSubtask,
        );
        self.render_subtasks(frame, chunks[2]);

        let hint = match self.editor.field {
            TodoField::Subtasks => "j/k: move  Space: toggle  x: remove",
            _ => "Tab: switch field",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, self.theme.hint_style())),
            chunks[3],
        );
    }

    fn render_subtasks(&self, frame: &mut Frame, area: Rect) {
        let active = self.editor.field == TodoField::Subtasks;
        let items: Vec<ListItem> = self
            .editor
            .draft
            .sub_tasks
            .iter()
            .map(|st| {
                let (check, style) = if st.completed {
                    ("[x] ", self.theme.completed_style())
                } else {
                    ("[ ] ", self.theme.panel())
                };
                ListItem::new(Line::from(vec![
                    Span::raw(check),
                    Span::styled(st.text.as_str(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Subtasks ({}) ", self.editor.draft.sub_tasks.len()))
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(active)),
            )
            .highlight_style(self.theme.selected_style());

        let mut state = ListState::default();
        if active {
            state.select(Some(self.editor.selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
        let cursor = if active { "|" } else { "" };
        let style = if active { self.theme.panel() } else { self.theme.hint_style() };

        let content = Paragraph::new(format!("{}{}", value, cursor))
            .block(
                Block::default()
                    .title(format!(" {} ", label))
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(active)),
            )
            .style(style);

        frame.render_widget(content, area);
    }
}
