//! Account creation screen.

use crate::services::signup::SignupField;
use crate::services::username::Availability;
use crate::state::{SignupFlow, SignupFocus, UiState};
use crate::ui::form::{button, centered_column, link, TextField, FIELD_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_signup(f: &mut Frame, flow: &SignupFlow, ui: &UiState, area: Rect) {
    let outer_block = Block::default().title("Create Account").borders(Borders::ALL);
    let inner = outer_block.inner(area);
    f.render_widget(outer_block, area);

    let column = centered_column(inner, 64);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT), // contact
            Constraint::Length(FIELD_HEIGHT), // username
            Constraint::Length(FIELD_HEIGHT), // image path
            Constraint::Length(1),            // image details
            Constraint::Length(FIELD_HEIGHT), // password
            Constraint::Length(FIELD_HEIGHT), // confirm
            Constraint::Length(2),            // submit
            Constraint::Length(1),            // google
            Constraint::Length(1),            // sign in
            Constraint::Min(0),
        ])
        .split(column);

    let editable = !flow.is_busy();
    let focused = |focus: SignupFocus| editable && flow.focus == focus;
    let hint = flow.contact_hint();

    TextField::new("Email or Phone", &flow.form.contact)
        .focused(focused(SignupFocus::Contact))
        .error(flow.errors.get(SignupField::Contact))
        .hint(Some(&hint))
        .render(f, chunks[0]);

    let username_title = match (flow.is_checking_username(), flow.username_availability()) {
        (true, _) => format!("Username {} checking...", ui.spinner()),
        (false, Some(Availability::Available)) => "Username ✓ available".to_string(),
        _ => "Username".to_string(),
    };
    TextField::new(&username_title, &flow.form.username)
        .focused(focused(SignupFocus::Username))
        .error(flow.errors.get(SignupField::Username))
        .hint(Some("3-20 letters, numbers or _"))
        .render(f, chunks[1]);

    TextField::new("Profile image path (Enter to load)", &flow.image_path)
        .focused(focused(SignupFocus::ProfileImage))
        .error(flow.errors.get(SignupField::ProfileImage))
        .hint(Some("/path/to/photo.png (max 5MB)"))
        .render(f, chunks[2]);

    if let Some(image) = &flow.form.profile_image {
        let dims = image
            .dimensions
            .map(|(w, h)| format!(", {}x{}", w, h))
            .unwrap_or_default();
        let kib = image.size_bytes.div_ceil(1024);
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(format!("{} ({}, {} KiB{})", image.file_name, image.mime_type, kib, dims)),
            ])),
            chunks[3],
        );
    }

    TextField::new("Password", &flow.form.password)
        .masked()
        .focused(focused(SignupFocus::Password))
        .error(flow.errors.get(SignupField::Password))
        .hint(Some("8 chars: upper, lower, digit, symbol"))
        .render(f, chunks[4]);
    TextField::new("Confirm Password", &flow.form.confirm_password)
        .masked()
        .focused(focused(SignupFocus::ConfirmPassword))
        .error(flow.errors.get(SignupField::ConfirmPassword))
        .render(f, chunks[5]);

    let submit_label = if flow.is_creating() {
        format!("{} Creating account...", ui.spinner())
    } else {
        "Create Account".to_string()
    };
    f.render_widget(button(&submit_label, flow.focus == SignupFocus::Submit, Color::Cyan), chunks[6]);

    let google_label = if flow.is_busy() && !flow.is_creating() {
        format!("{} Google", ui.spinner())
    } else {
        "Sign up with Google".to_string()
    };
    f.render_widget(button(&google_label, flow.focus == SignupFocus::Google, Color::Red), chunks[7]);
    f.render_widget(
        link("Already have an account? Sign in", flow.focus == SignupFocus::SignIn),
        chunks[8],
    );

    if !flow.errors.is_empty() && chunks[9].height > 0 {
        let count = flow.errors.len();
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("{} field(s) need attention", count),
                Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            chunks[9],
        );
    }
}
