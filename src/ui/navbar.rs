use crate::model::{AuthenticatedUser, POPULAR_CITIES};
use crate::state::browse::ACCOUNT_MENU;
use crate::state::{HomePane, HomeState, NavItem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

fn item_style(home: &HomeState, item: NavItem) -> Style {
    if home.pane == HomePane::Navbar && home.navbar.focus == item {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub fn draw_navbar(f: &mut Frame, home: &HomeState, user: Option<&AuthenticatedUser>, area: Rect) {
    let border = if home.pane == HomePane::Navbar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(18),
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(24),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            " SEL ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("📍 {} ▾", home.navbar.city),
            item_style(home, NavItem::Location),
        )),
        chunks[1],
    );

    let search_focused = home.pane == HomePane::Navbar && home.navbar.focus == NavItem::Search;
    let search = if home.navbar.search.is_empty() && !search_focused {
        Line::from(Span::styled(
            "🔍 Search cars, mobiles and more...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw("🔍 "),
            Span::styled(home.navbar.search.clone(), item_style(home, NavItem::Search)),
        ])
    };
    f.render_widget(Paragraph::new(search), chunks[2]);
    if search_focused && !home.navbar.dropdown_open() {
        let x = chunks[2].x + 3 + home.navbar.search.chars().count() as u16;
        f.set_cursor_position((x.min(chunks[2].right().saturating_sub(1)), chunks[2].y));
    }

    let sell_style = if home.pane == HomePane::Navbar && home.navbar.focus == NavItem::Sell {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    f.render_widget(Paragraph::new(Span::styled("+ SELL", sell_style)), chunks[3]);

    let account = user.map_or("Account".to_string(), |u| u.name.clone());
    f.render_widget(
        Paragraph::new(Span::styled(format!("👤 {} ▾", account), item_style(home, NavItem::Account))),
        chunks[4],
    );
}

/// Draws whichever navbar dropdown is open, anchored under its entry.
pub fn draw_navbar_dropdown(f: &mut Frame, home: &HomeState, user: Option<&AuthenticatedUser>, navbar_area: Rect) {
    let nav = &home.navbar;
    let (x, items, width): (u16, Vec<ListItem>, u16) = if nav.location_open {
        let items = POPULAR_CITIES
            .iter()
            .map(|c| {
                let marker = if *c == nav.city { "● " } else { "  " };
                ListItem::new(format!("{}{}", marker, c))
            })
            .collect();
        (navbar_area.x + 9, items, 20)
    } else if nav.account_open {
        let mut items: Vec<ListItem> = Vec::new();
        if let Some(user) = user {
            items.push(ListItem::new(Line::from(Span::styled(
                user.email.clone(),
                Style::default().fg(Color::DarkGray),
            ))));
        }
        items.extend(ACCOUNT_MENU.iter().map(|m| ListItem::new(*m)));
        (navbar_area.right().saturating_sub(30), items, 28)
    } else {
        return;
    };

    let offset = if nav.account_open && user.is_some() { 1 } else { 0 };
    let height = items.len() as u16 + 2;
    let area = Rect {
        x,
        y: navbar_area.bottom(),
        width,
        height,
    }
    .intersection(f.area());

    let mut state = ListState::default();
    state.select(Some(nav.dropdown_selected + offset));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
