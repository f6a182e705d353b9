//! Main UI module. Re-exports submodules and provides the main entry point.

pub mod auth;
pub mod banner;
pub mod filters;
pub mod form;
pub mod forgot;
pub mod listings;
pub mod navbar;
pub mod popups;
pub mod signup;
pub mod time_format;

use crate::app::{App, Screen};
use crate::state::AppMode;
use crate::ui::auth::draw_login;
use crate::ui::banner::{draw_full_banner, draw_min_banner};
use crate::ui::filters::draw_filters;
use crate::ui::forgot::draw_forgot_password;
use crate::ui::listings::draw_listings;
use crate::ui::navbar::{draw_navbar, draw_navbar_dropdown};
use crate::ui::popups::{draw_notification_popup, draw_quit_confirm_popup};
use crate::ui::signup::draw_signup;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const FILTER_PANE_WIDTH: u16 = 34;

fn help_text(app: &App) -> &'static str {
    match &app.screen {
        Screen::Login(flow) if flow.otp().is_some() => {
            "[0-9] Enter OTP | [Enter] Verify | [Ctrl+R] Resend\n[Esc] Back to login"
        }
        Screen::Login(_) => "[Tab]/[Shift+Tab] Change Focus | [Space] Toggle | [Enter] Select/Submit\n[Esc] QUIT",
        Screen::Signup(_) => "[Tab]/[Shift+Tab] Change Focus | [Enter] Next/Submit\n[Esc] Back to login",
        Screen::ForgotPassword(_) => "[Tab]/[Shift+Tab] Change Focus | [Enter] Select\n[Esc] Back to login",
        Screen::Home(_) => "[Tab] Change Pane | [←↑↓→] Nav | [Enter] Select | [s] Sort\n[/] Search | [c] Clear filters | [Esc] Close/Quit",
    }
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match &app.session {
        Some(user) => format!("Logged in as: {}", user.name),
        None => "Not Logged In".to_string(),
    };

    let footer_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(67), Constraint::Percentage(33)])
        .split(area);

    f.render_widget(
        Paragraph::new(help_text(app))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::TOP)),
        footer_chunks[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(status_text, Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::TOP)),
        footer_chunks[1],
    );
}

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let full_banner = app.ui.mode != AppMode::Home;
    let banner_height = if full_banner {
        crate::banner::banner_height() + 1
    } else {
        2
    };
    let chunks = Layout::default()
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(size);

    if full_banner {
        draw_full_banner(f, app.ui.tick_count, chunks[0]);
    } else {
        draw_min_banner(f, chunks[0]);
    }
    draw_footer(f, app, chunks[2]);

    let main_area = chunks[1];
    match &app.screen {
        Screen::Login(flow) => draw_login(f, flow, &app.ui, main_area),
        Screen::Signup(flow) => draw_signup(f, flow, &app.ui, main_area),
        Screen::ForgotPassword(flow) => draw_forgot_password(f, flow, &app.ui, main_area),
        Screen::Home(home) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(main_area);
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(FILTER_PANE_WIDTH), Constraint::Min(0)])
                .split(rows[1]);
            let user = app.session.as_ref();
            draw_navbar(f, home, user, rows[0]);
            draw_filters(f, home, body[0]);
            draw_listings(f, home, body[1]);
            draw_navbar_dropdown(f, home, user, rows[0]);
        }
    }

    if let Some(notice) = &app.notifications.current {
        draw_notification_popup(f, notice);
    }
    if app.ui.show_quit_confirm {
        draw_quit_confirm_popup(f, &app.ui);
    }
}
