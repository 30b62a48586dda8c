use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::tui::theme::Theme;

/// Numbered lap entries, oldest first
pub struct LapListWidget<'a> {
    laps: &'a [String],
    theme: &'a Theme,
}

impl<'a> LapListWidget<'a> {
    pub fn new(laps: &'a [String], theme: &'a Theme) -> Self {
        Self { laps, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = if self.laps.is_empty() {
            vec![ListItem::new(Span::styled("No laps yet", self.theme.hint_style()))]
        } else {
            self.laps
                .iter()
                .enumerate()
                .map(|(i, lap)| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:>3}. ", i + 1), self.theme.hint_style()),
                        Span::raw(lap.as_str()),
                    ]))
                })
                .collect()
        };

        let list = List::new(items).style(self.theme.panel()).block(
            Block::default()
                .title(format!(" Laps ({}) ", self.laps.len()))
                .title_style(self.theme.title_style())
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(false)),
        );

        frame.render_widget(list, area);
    }
}
