use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::theme::Theme;

/// Yes/no prompt shown before a delete
pub struct ConfirmWidget<'a> {
    message: String,
    theme: &'a Theme,
}

impl<'a> ConfirmWidget<'a> {
    pub fn new(message: String, theme: &'a Theme) -> Self {
        Self { message, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let content = vec![
            Line::from(""),
            Line::from(self.message.as_str()),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", self.theme.danger_style()),
                Span::raw(": delete   "),
                Span::styled("any other key", self.theme.title_style()),
                Span::raw(": keep"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .alignment(Alignment::Center)
            .style(self.theme.panel())
            .block(
                Block::default()
                    .title(" Confirm delete ")
                    .borders(Borders::ALL)
                    .border_style(self.theme.danger_style()),
            )
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}
