use figlet_rs::FIGfont;
use once_cell::sync::Lazy;
use rand::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const BANNER_TEXT: &str = "SEL";

#[derive(Clone)]
struct BufferChar {
    char: char,
    style: Style,
}

/// Rendered once; the font never changes.
static FIGLET_LINES: Lazy<Vec<String>> = Lazy::new(|| {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(BANNER_TEXT).map(|figure| figure.to_string()))
        .map(|text| {
            text.lines()
                .map(|l| l.trim_end().to_string())
                .filter(|l| !l.is_empty())
                .collect()
        })
        .unwrap_or_else(|| vec![BANNER_TEXT.to_string()])
});

/// Height the banner occupies, padding included.
pub fn banner_height() -> u16 {
    FIGLET_LINES.len() as u16 + 2
}

pub fn get_styled_banner_lines(width: u16, tick_count: u64) -> Vec<Line<'static>> {
    let figlet_width = FIGLET_LINES.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = width as usize;
    let height = banner_height() as usize;

    if figlet_width > width {
        return vec![Line::from(Span::styled(
            BANNER_TEXT,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
    }

    let mut buffer: Vec<Vec<BufferChar>> = vec![
        vec![
            BufferChar {
                char: ' ',
                style: Style::default(),
            };
            width
        ];
        height
    ];

    let start_y = 1;
    let start_x = (width - figlet_width) / 2;
    for (y, line) in FIGLET_LINES.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            if let Some(cell) = buffer.get_mut(start_y + y).and_then(|row| row.get_mut(start_x + x)) {
                if ch != ' ' {
                    cell.char = ch;
                    cell.style = Style::default().fg(Color::Cyan);
                }
            }
        }
    }

    let mut rng = thread_rng();
    for (y, row) in buffer.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let glitch_chance =
                0.0005 + (tick_count as f64 * 0.01 + (y as f64 * 0.5) + (x as f64 * 0.01)).cos().powi(2) * 0.001;
            if rng.gen_bool(glitch_chance) {
                cell.style = cell.style.bg(Color::Black).fg(Color::Yellow);
                if rng.gen_bool(0.5) {
                    cell.char = *['█', '▓', '▒', '░'].choose(&mut rng).unwrap_or(&' ');
                }
            }
        }
    }

    buffer
        .into_iter()
        .map(|row| {
            let mut spans = Vec::new();
            let mut current_style = Style::default();
            let mut current_text = String::new();

            for cell in row {
                if cell.style == current_style {
                    current_text.push(cell.char);
                } else {
                    if !current_text.is_empty() {
                        spans.push(Span::styled(current_text, current_style));
                    }
                    current_style = cell.style;
                    current_text = String::from(cell.char);
                }
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(current_text, current_style));
            }
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_fills_requested_width() {
        let lines = get_styled_banner_lines(80, 0);
        assert_eq!(lines.len(), banner_height() as usize);
        assert!(lines.iter().all(|l| l.width() == 80));
    }

    #[test]
    fn narrow_terminal_falls_back_to_plain_text() {
        let lines = get_styled_banner_lines(2, 0);
        assert_eq!(lines.len(), 1);
    }
}
