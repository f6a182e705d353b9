use crate::model::CATEGORIES;
use crate::state::{FilterKind, FilterRow, HomePane, HomeState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

fn option_text(kind: FilterKind, index: usize) -> String {
    match (kind, CATEGORIES.get(index)) {
        (FilterKind::Category, Some(category)) => {
            format!("{} {} ({})", category.icon(), category.name, category.count)
        }
        _ => kind.option_label(index),
    }
}

pub fn draw_filters(f: &mut Frame, home: &HomeState, area: Rect) {
    let focused = home.pane == HomePane::Filters;
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let active = home.filters.active();
    let active_height = if active.is_empty() { 0 } else { (active.len() as u16 + 2).min(area.height / 3) };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(active_height), Constraint::Min(0)])
        .split(area);

    if !active.is_empty() {
        let lines: Vec<Line> = active
            .iter()
            .map(|(kind, label)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", kind.title()), Style::default().fg(Color::DarkGray)),
                    Span::styled(label.clone(), Style::default().fg(Color::Yellow)),
                ])
            })
            .collect();
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Active filters")),
            chunks[0],
        );
    }

    let items: Vec<ListItem> = home
        .filters
        .rows()
        .into_iter()
        .map(|row| match row {
            FilterRow::ClearAll => ListItem::new(Span::styled("✕ Clear all", Style::default().fg(Color::Red))),
            FilterRow::Header(s) => {
                let section = &home.filters.sections[s];
                let arrow = if section.expanded { "▾" } else { "▸" };
                ListItem::new(Span::styled(
                    format!("{} {}", arrow, section.kind.title()),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            }
            FilterRow::Option(s, o) => {
                let section = &home.filters.sections[s];
                let selected = section.selected == Some(o);
                let radio = if selected { "◉" } else { "○" };
                let style = if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(format!("  {} {}", radio, option_text(section.kind, o)), style))
            }
        })
        .collect();

    let mut state = ListState::default();
    if focused {
        state.select(Some(home.filters.cursor));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Filters").border_style(border))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
    f.render_stateful_widget(list, chunks[1], &mut state);
}
