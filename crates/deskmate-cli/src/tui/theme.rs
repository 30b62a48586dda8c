use deskmate_core::Theme as Scheme;
use ratatui::style::{Color, Modifier, Style};

/// Application palette for one color scheme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub panel: Color,
    pub accent: Color,
    pub danger: Color,
    pub muted: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xfa, 0xeb, 0xd7),
            text: Color::Black,
            panel: Color::White,
            accent: Color::Rgb(0xda, 0xa5, 0x20),
            danger: Color::Rgb(0xe5, 0x73, 0x73),
            muted: Color::Gray,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x22, 0x22, 0x22),
            text: Color::Rgb(0xfa, 0xeb, 0xd7),
            panel: Color::Rgb(0x33, 0x33, 0x33),
            accent: Color::Rgb(0xff, 0xd7, 0x00),
            danger: Color::Rgb(0xe5, 0x73, 0x73),
            muted: Color::DarkGray,
        }
    }

    pub fn for_scheme(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Light => Self::light(),
            Scheme::Dark => Self::dark(),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn panel(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.muted })
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn completed_style(&self) -> Style {
        Style::default()
            .fg(self.muted)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn danger_style(&self) -> Style {
        Style::default().fg(self.danger).add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_scheme_picks_palette() {
        assert_eq!(Theme::for_scheme(Scheme::Light).accent, Color::Rgb(0xda, 0xa5, 0x20));
        assert_eq!(Theme::for_scheme(Scheme::Dark).accent, Color::Rgb(0xff, 0xd7, 0x00));
    }
}
