use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::app::{NoteEditor, NoteField};
use crate::tui::theme::Theme;

pub struct NoteEditorWidget<'a> {
    editor: &'a NoteEditor,
    theme: &'a Theme,
}

impl<'a> NoteEditorWidget<'a> {
    pub fn new(editor: &'a NoteEditor, theme: &'a Theme) -> Self {
        Self { editor, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let title = if self.editor.id.is_some() {
            " Edit Note (Tab: next field, Enter: new line, Ctrl+S: save, Esc: cancel) "
        } else {
            " New Note (Tab: next field, Enter: new line, Ctrl+S: save, Esc: cancel) "
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
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(inner);

        self.render_field(
            frame,
            chunks[0],
            "Title",
            self.editor.title.value(),
            self.editor.field == NoteField::Title,
        );
        self.render_field(
            frame,
            chunks[1],
            "Content",
            self.editor.content.value(),
            self.editor.field == NoteField::Content,
        );
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
            .style(style)
            .wrap(Wrap { trim: false });

        frame.render_widget(content, area);
    }
}
