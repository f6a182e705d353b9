use crate::model::{self, format_price, Listing};
use crate::state::browse::GRID_COLUMNS;
use crate::state::{HomePane, HomeState};
use crate::ui::time_format::format_posted_at;
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_HEIGHT: u16 = 7;

fn listing_card<'a>(listing: &Listing, selected: bool, now: DateTime<Utc>) -> Paragraph<'a> {
    let icon = model::category(listing.category).map_or("•", |c| c.icon());
    let mut lines = vec![
        Line::from(Span::styled(
            format_price(listing.price),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} {}", icon, listing.title)),
    ];
    if let Some(v) = &listing.vehicle {
        lines.push(Line::from(Span::styled(
            format!("{} · {} km · {}", v.year, v.km_driven, v.fuel.label()),
            Style::default().fg(Color::Gray),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled(format!("📍 {}", listing.location), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(format_posted_at(listing.posted_at, now), Style::default().fg(Color::DarkGray)),
    ]));

    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).border_style(border))
}

fn selection_detail(listing: &Listing) -> Line<'static> {
    let mut spans = vec![Span::styled(
        listing.title.clone(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(v) = &listing.vehicle {
        spans.push(Span::styled(
            format!(
                "  {} {} · {} · {} owner(s)",
                v.brand,
                v.model,
                v.transmission.label(),
                v.owners
            ),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}

pub fn draw_listings(f: &mut Frame, home: &HomeState, area: Rect) {
    let focused = home.pane == HomePane::Listings;
    let visible = home.visible_listings();
    let title = format!(
        "{} ads · Sort: {} [s]",
        visible.len(),
        home.sort.label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if focused { Style::default().fg(Color::Cyan) } else { Style::default() });
    let inner = block.inner(area);
    f.render_widget(block, area);

    if visible.is_empty() {
        f.render_widget(
            Paragraph::new("No listings match your filters.").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let (grid, detail) = (parts[0], parts[1]);
    if let Some(listing) = home.selected_listing() {
        f.render_widget(Paragraph::new(selection_detail(listing)), detail);
    }

    let rows_fit = (grid.height / CARD_HEIGHT).max(1) as usize;
    let selected_row = home.selected / GRID_COLUMNS;
    let first_row = selected_row.saturating_sub(rows_fit - 1);
    let now = Utc::now();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_fit])
        .split(grid);
    for (r, row_area) in row_areas.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);
        for (c, cell) in cols.iter().enumerate() {
            let index = (first_row + r) * GRID_COLUMNS + c;
            if let Some(listing) = visible.get(index) {
                let selected = focused && index == home.selected;
                f.render_widget(listing_card(listing, selected, now), *cell);
            }
        }
    }
}
