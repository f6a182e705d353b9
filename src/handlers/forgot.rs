use crate::app::{App, Screen};
use crate::handlers::navigation::cycle_focus;
use crate::state::ForgotFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle forgot-password screen input
pub fn handle_forgot_input(key: KeyEvent, app: &mut App) {
    let Screen::ForgotPassword(flow) = &mut app.screen else {
        return;
    };
    if cycle_focus(key, &mut flow.focus, ForgotFocus::next, ForgotFocus::prev) {
        return;
    }
    match key.code {
        KeyCode::Char(c) if flow.focus == ForgotFocus::Contact && !key.modifiers.contains(KeyModifiers::CONTROL) => {
            flow.input_char(c)
        }
        KeyCode::Backspace if flow.focus == ForgotFocus::Contact => flow.backspace(),
        KeyCode::Enter => match flow.focus {
            ForgotFocus::Contact | ForgotFocus::Submit => {
                flow.submit(&mut app.backend);
            }
            ForgotFocus::Back => app.back_to_login(),
        },
        KeyCode::Esc => app.back_to_login(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::*;
    use crate::state::{AppMode, LoginFocus};
    use crossterm::event::KeyCode;

    #[tokio::test(start_paused = true)]
    async fn reset_request_from_login_link() {
        let (mut app, mut rx) = app();
        if let crate::app::Screen::Login(flow) = &mut app.screen {
            flow.focus = LoginFocus::ForgotPassword;
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, AppMode::ForgotPassword);

        type_text(&mut app, "9876543210");
        press(&mut app, KeyCode::Enter);
        let event = rx.recv().await.unwrap();
        app.handle_backend_event(event);
        assert_eq!(
            app.notifications.current.as_ref().unwrap().message,
            "Password reset instructions sent to +919876543210"
        );

        press(&mut app, KeyCode::Enter); // dismiss
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.mode, AppMode::Login);
    }
}
