use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::{
        Block, Borders,
        canvas::{Canvas, Circle, Line},
    },
};

use crate::tui::theme::Theme;

const FACE_RADIUS: f64 = 1.0;
const HAND_LENGTH: f64 = 0.85;

/// End point of a hand at `angle` degrees clockwise from twelve o'clock.
pub fn hand_tip(angle: f64, length: f64) -> (f64, f64) {
    let radians = angle.to_radians();
    (length * radians.sin(), length * radians.cos())
}

/// Analog dial with a single seconds hand
pub struct ClockWidget<'a> {
    angle: f64,
    theme: &'a Theme,
}

impl<'a> ClockWidget<'a> {
    pub fn new(angle: f64, theme: &'a Theme) -> Self {
        Self { angle, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let theme = self.theme;
        let (x2, y2) = hand_tip(self.angle, HAND_LENGTH);

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(false)),
            )
            .background_color(theme.background)
            .marker(Marker::Braille)
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: FACE_RADIUS,
                    color: theme.text,
                });

                // Five-second marks
                for mark in 0..12 {
                    let angle = f64::from(mark) * 30.0;
                    let (x1, y1) = hand_tip(angle, FACE_RADIUS * 0.9);
                    let (ox, oy) = hand_tip(angle, FACE_RADIUS);
                    ctx.draw(&Line::new(x1, y1, ox, oy, theme.muted));
                }

                ctx.draw(&Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2,
                    y2,
                    color: theme.accent,
                });
            });

        frame.render_widget(canvas, area);
    }
}
