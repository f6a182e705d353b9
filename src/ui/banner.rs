//! Banner drawing utilities for the UI.

use crate::banner::get_styled_banner_lines;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_full_banner(f: &mut Frame, tick_count: u64, area: Rect) {
    let banner = Paragraph::new(get_styled_banner_lines(area.width, tick_count))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(banner, area);
}

pub fn draw_min_banner(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("SEL", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("  buy and sell near you", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM)),
        area,
    );
}
