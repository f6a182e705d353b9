use crate::state::{ForgotFocus, ForgotPasswordFlow, ForgotPhase, UiState};
use crate::ui::form::{button, centered_column, link, TextField, FIELD_HEIGHT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw_forgot_password(f: &mut Frame, flow: &ForgotPasswordFlow, ui: &UiState, area: Rect) {
    let outer_block = Block::default().title("Reset Password").borders(Borders::ALL);
    let inner = outer_block.inner(area);
    f.render_widget(outer_block, area);

    let column = centered_column(inner, 56);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(column);

    f.render_widget(
        Paragraph::new("Enter your email or phone number and we'll send you reset instructions.")
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center),
        chunks[0],
    );

    let hint = flow.contact_hint();
    let editing = matches!(flow.phase(), ForgotPhase::Editing);
    TextField::new("Email or Phone", &flow.contact)
        .focused(editing && flow.focus == ForgotFocus::Contact)
        .error(flow.error.as_deref())
        .hint(Some(&hint))
        .render(f, chunks[1]);

    match flow.phase() {
        ForgotPhase::Editing => {
            f.render_widget(button("Send Reset Link", flow.focus == ForgotFocus::Submit, Color::Cyan), chunks[2]);
        }
        ForgotPhase::Sending(_) => {
            let label = format!("{} Sending...", ui.spinner());
            f.render_widget(button(&label, false, Color::Cyan), chunks[2]);
        }
        ForgotPhase::Sent { destination } => {
            f.render_widget(
                Paragraph::new(Span::styled(
                    format!("Reset instructions sent to {}", destination),
                    Style::default().fg(Color::Green),
                ))
                .alignment(Alignment::Center),
                chunks[2],
            );
        }
    }

    f.render_widget(link("Back to login", flow.focus == ForgotFocus::Back), chunks[3]);
}
