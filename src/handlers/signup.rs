use crate::app::{App, Screen};
use crate::handlers::navigation::cycle_focus;
use crate::model::AuthProvider;
use crate::state::SignupFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle signup screen input
pub fn handle_signup_input(key: KeyEvent, app: &mut App) {
    let Screen::Signup(flow) = &mut app.screen else {
        return;
    };
    if cycle_focus(key, &mut flow.focus, SignupFocus::next, SignupFocus::prev) {
        return;
    }
    match key.code {
        KeyCode::Char(c) if flow.focus.is_text_field() && !key.modifiers.contains(KeyModifiers::CONTROL) => flow.input_char(c, &mut app.backend),
        KeyCode::Backspace => flow.backspace(&mut app.backend),
        KeyCode::Down => flow.focus = flow.focus.next(),
        KeyCode::Up => flow.focus = flow.focus.prev(),
        KeyCode::Enter => match flow.focus {
            SignupFocus::ProfileImage => {
                if flow.load_image() {
                    flow.focus = flow.focus.next();
                }
            }
            SignupFocus::ConfirmPassword | SignupFocus::Submit => {
                flow.submit(&mut app.backend);
            }
            SignupFocus::Google => app.sign_in_with(AuthProvider::Google),
            SignupFocus::SignIn => app.toggle_auth(),
            _ => flow.focus = flow.focus.next(),
        },
        KeyCode::Esc => app.back_to_login(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Screen;
    use crate::handlers::test_support::*;
    use crate::services::signup::SignupField;
    use crate::state::AppMode;
    use crossterm::event::KeyCode;

    fn to_signup(app: &mut crate::app::App) {
        app.toggle_auth();
        assert_eq!(app.ui.mode, AppMode::Signup);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_a_taken_username_flags_it() {
        let (mut app, mut rx) = app();
        to_signup(&mut app);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "seller");

        let event = rx.recv().await.unwrap();
        app.handle_backend_event(event);
        let Screen::Signup(flow) = &app.screen else {
            panic!("expected signup");
        };
        assert_eq!(flow.errors.get(SignupField::Username), Some("Username is already taken"));
    }

    #[tokio::test(start_paused = true)]
    async fn mismatched_passwords_are_not_submitted() {
        let (mut app, _rx) = app();
        to_signup(&mut app);
        type_text(&mut app, "9876543210");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ravi_k");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abc123!@");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abc123!X");
        press(&mut app, KeyCode::Enter);

        let Screen::Signup(flow) = &app.screen else {
            panic!("expected signup");
        };
        assert_eq!(flow.errors.get(SignupField::ConfirmPassword), Some("Passwords do not match"));
        assert!(!flow.is_creating());
    }

    #[tokio::test]
    async fn esc_returns_to_login() {
        let (mut app, _rx) = app();
        to_signup(&mut app);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui.mode, AppMode::Login);
    }
}
