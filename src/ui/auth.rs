//! Login and OTP verification screens.

use crate::model::AuthProvider;
use crate::services::otp::OTP_LENGTH;
use crate::state::{LoginFlow, LoginFocus, LoginPhase, OtpChallengeState, UiState};
use crate::ui::form::{button, centered_column, link, TextField, FIELD_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_login(f: &mut Frame, flow: &LoginFlow, ui: &UiState, area: Rect) {
    match flow.phase() {
        LoginPhase::Challenge { otp, .. } => draw_otp(f, otp, area),
        _ => draw_credentials(f, flow, ui, area),
    }
}

fn draw_credentials(f: &mut Frame, flow: &LoginFlow, ui: &UiState, area: Rect) {
    let outer_block = Block::default().title("Login").borders(Borders::ALL);
    let inner = outer_block.inner(area);
    f.render_widget(outer_block, area);

    let column = centered_column(inner, 60);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),            // heading
            Constraint::Length(FIELD_HEIGHT), // contact
            Constraint::Length(FIELD_HEIGHT), // password
            Constraint::Length(1),            // remember me
            Constraint::Length(2),            // submit
            Constraint::Length(1),            // forgot password
            Constraint::Length(1),            // divider
            Constraint::Length(2),            // social
            Constraint::Length(1),            // sign up
            Constraint::Length(1),            // skip
            Constraint::Min(0),
        ])
        .split(column);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Welcome back! Sign in to continue",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[0],
    );

    let hint = flow.contacts().hint();
    let editable = flow.accepts_credential_input();
    TextField::new("Email or Phone", &flow.credential.contact)
        .focused(editable && flow.focus == LoginFocus::Contact)
        .error(flow.contact_error.as_deref())
        .hint(Some(&hint))
        .render(f, chunks[1]);
    TextField::new("Password", &flow.credential.password)
        .masked()
        .focused(editable && flow.focus == LoginFocus::Password)
        .error(flow.password_error.as_deref())
        .render(f, chunks[2]);

    let check = if flow.remember_me { "[x]" } else { "[ ]" };
    let remember_style = if flow.focus == LoginFocus::RememberMe {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("{} Remember me", check), remember_style)),
        chunks[3],
    );

    let submit_label = if flow.is_dispatching() {
        format!("{} Sending OTP...", ui.spinner())
    } else {
        "Sign In".to_string()
    };
    f.render_widget(button(&submit_label, flow.focus == LoginFocus::Submit, Color::Cyan), chunks[4]);
    f.render_widget(link("Forgot password?", flow.focus == LoginFocus::ForgotPassword), chunks[5]);
    f.render_widget(
        Paragraph::new(Span::styled("─── or continue with ───", Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Center),
        chunks[6],
    );

    let social = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[7]);
    let pending = flow.pending_social();
    let google = match pending {
        Some(AuthProvider::Google) => format!("{} Google", ui.spinner()),
        _ => "Google".to_string(),
    };
    let facebook = match pending {
        Some(AuthProvider::Facebook) => format!("{} Facebook", ui.spinner()),
        _ => "Facebook".to_string(),
    };
    f.render_widget(button(&google, flow.focus == LoginFocus::Google, Color::Red), social[0]);
    f.render_widget(button(&facebook, flow.focus == LoginFocus::Facebook, Color::Blue), social[1]);

    f.render_widget(
        link("Don't have an account? Sign up here", flow.focus == LoginFocus::SignUp),
        chunks[8],
    );
    f.render_widget(link("Skip to main app (demo)", flow.focus == LoginFocus::SkipDemo), chunks[9]);
}

pub fn draw_otp(f: &mut Frame, otp: &OtpChallengeState, area: Rect) {
    let outer_block = Block::default().title("Verify OTP").borders(Borders::ALL);
    let inner = outer_block.inner(area);
    f.render_widget(outer_block, area);

    let column = centered_column(inner, 50);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(column);

    f.render_widget(
        Paragraph::new(vec![
            Line::from("Enter the 6-digit code sent to"),
            Line::from(Span::styled(
                otp.destination().to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center),
        chunks[0],
    );

    let digits: Vec<char> = otp.input.chars().collect();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, OTP_LENGTH as u32); OTP_LENGTH])
        .split(chunks[1]);
    for (i, cell) in cells.iter().enumerate() {
        let active = i == digits.len();
        let border = if otp.error.is_some() {
            Style::default().fg(Color::Red)
        } else if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = digits.get(i).map(|d| d.to_string()).unwrap_or_default();
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border)),
            *cell,
        );
    }

    if let Some(error) = &otp.error {
        f.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))).alignment(Alignment::Center),
            chunks[2],
        );
    }

    f.render_widget(
        Paragraph::new("[Enter] Verify   [Ctrl+R] Resend OTP   [Esc] Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[3],
    );
}
