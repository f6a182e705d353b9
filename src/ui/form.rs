//! Shared form widgets: bordered text inputs with an inline error line, and buttons.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one input: three for the box, one for its error.
pub const FIELD_HEIGHT: u16 = 4;

pub struct TextField<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    pub masked: bool,
    pub error: Option<&'a str>,
    pub hint: Option<&'a str>,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            masked: false,
            error: None,
            hint: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn hint(mut self, hint: Option<&'a str>) -> Self {
        self.hint = hint;
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let box_area = Rect { height: area.height.min(3), ..area };
        let border_style = if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let shown = if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.to_string()
        };
        let content = if shown.is_empty() && !self.focused {
            Line::from(Span::styled(self.hint.unwrap_or(""), Style::default().fg(Color::DarkGray)))
        } else {
            Line::from(shown.clone())
        };
        f.render_widget(
            Paragraph::new(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.label)
                    .border_style(border_style),
            ),
            box_area,
        );

        if area.height > 3 {
            let below = Rect {
                y: area.y + 3,
                height: 1,
                ..area
            };
            if let Some(error) = self.error {
                f.render_widget(
                    Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
                    below,
                );
            }
        }

        if self.focused {
            let col = shown.chars().count() as u16;
            let max_x = box_area.x + box_area.width.saturating_sub(2);
            f.set_cursor_position(((box_area.x + 1 + col).min(max_x), box_area.y + 1));
        }
    }
}

pub fn button<'a>(label: &'a str, focused: bool, accent: Color) -> Paragraph<'a> {
    let style = if focused {
        Style::default().bg(accent).fg(Color::Black).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };
    Paragraph::new(Span::styled(format!("[ {} ]", label), style)).alignment(Alignment::Center)
}

pub fn link<'a>(label: &'a str, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center)
}

/// Centers a column of `width` inside `area`.
pub fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
