use deskmate_core::Note;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::theme::Theme;

pub struct NoteDetailWidget<'a> {
    note: &'a Note,
    theme: &'a Theme,
}

impl<'a> NoteDetailWidget<'a> {
    pub fn new(note: &'a Note, theme: &'a Theme) -> Self {
        Self { note, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let mut content = vec![
            Line::from(Span::styled(self.note.title.as_str(), self.theme.title_style())),
            Line::from(""),
        ];
        content.extend(self.note.content.lines().map(Line::from));

        let paragraph = Paragraph::new(content)
            .style(self.theme.panel())
            .block(
                Block::default()
                    .title(" Note (e: edit, Esc: close) ")
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(true)),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, area);
    }
}
