//! Popups: notices and the quit confirmation dialog.

use crate::state::notification::Notice;
use crate::state::{NoticeLevel, UiState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_centered_rect(r: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let popup_layout = Layout::default().direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2), Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ]).split(r);
    Layout::default().direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2), Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ]).split(popup_layout[1])[1]
}

fn notice_style(level: NoticeLevel) -> (&'static str, Color) {
    match level {
        NoticeLevel::Info => ("Notice", Color::Cyan),
        NoticeLevel::Success => ("Success", Color::Green),
    }
}

/// Toast in the top-right corner. Sticky notices carry a dismissal hint.
pub fn draw_notification_popup(f: &mut Frame, notice: &Notice) {
    let size = f.area();
    let (title, color) = notice_style(notice.level);
    let width = (notice.message.chars().count() as u16 + 4).clamp(30, (size.width / 2).max(30)).min(size.width);
    let inner_width = width.saturating_sub(2).max(1);
    let text_lines = (notice.message.chars().count() as u16).div_ceil(inner_width).max(1);
    let sticky = notice.close_tick.is_none();
    let height = (text_lines + 2 + u16::from(sticky)).min(size.height);
    let area = Rect {
        x: size.x + size.width.saturating_sub(width + 2),
        y: size.y + 1,
        width,
        height,
    }
    .intersection(size);

    let mut content = vec![Line::from(notice.message.as_str())];
    if sticky {
        content.push(Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color));
    let p = Paragraph::new(content).wrap(Wrap { trim: true }).block(block);
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

pub fn draw_quit_confirm_popup(f: &mut Frame, ui: &UiState) {
    // Grow the popup until message and buttons fit, up to 60% of the screen
    let mut percent_y = 18u16;
    let percent_x = 40u16;
    let content_lines = 5;
    let mut area = draw_centered_rect(f.area(), percent_x, percent_y);
    let mut popup_height = area.height.saturating_sub(2);
    while popup_height < content_lines && percent_y < 60 {
        percent_y += 5;
        area = draw_centered_rect(f.area(), percent_x, percent_y);
        popup_height = area.height.saturating_sub(2);
    }
    let block = Block::default()
        .title("Are you sure?")
        .borders(Borders::ALL)
        .border_type(BorderType::Double);
    let pad_top = popup_height.saturating_sub(content_lines) / 2;

    let mut lines = Vec::new();
    for _ in 0..pad_top + 1 { lines.push(Line::from("")); }
    lines.push(Line::from(Span::styled(
        "Do you really want to quit?",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    let yes_style = if ui.quit_confirm_selected == 0 {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let no_style = if ui.quit_confirm_selected == 1 {
        Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };
    lines.push(Line::from(vec![
        Span::styled("[ Yes ]", yes_style),
        Span::raw("  "),
        Span::styled("[ No ]", no_style),
    ]));

    let p = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
