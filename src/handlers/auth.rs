use crate::app::{App, Screen};
use crate::handlers::navigation::cycle_focus;
use crate::model::AuthProvider;
use crate::state::{LoginFocus, LoginPhase, OtpChallengeState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle login screen input, including the OTP challenge
pub fn handle_login_input(key: KeyEvent, app: &mut App) {
    let Screen::Login(flow) = &mut app.screen else {
        return;
    };
    let in_challenge = matches!(flow.phase(), LoginPhase::Challenge { .. });
    let editing = matches!(flow.phase(), LoginPhase::Credentials);

    if in_challenge {
        handle_otp_input(key, app);
    } else if editing {
        handle_credentials_input(key, app);
    } else if key.code == KeyCode::Esc {
        app.ui.open_quit_confirm();
    }
}

fn handle_credentials_input(key: KeyEvent, app: &mut App) {
    let Screen::Login(flow) = &mut app.screen else {
        return;
    };
    if cycle_focus(key, &mut flow.focus, LoginFocus::next, LoginFocus::prev) {
        return;
    }
    match key.code {
        KeyCode::Char(' ') if flow.focus == LoginFocus::RememberMe => {
            flow.remember_me = !flow.remember_me;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => flow.input_char(c),
        KeyCode::Backspace => flow.backspace(),
        KeyCode::Down => flow.focus = flow.focus.next(),
        KeyCode::Up => flow.focus = flow.focus.prev(),
        KeyCode::Enter => activate(app),
        KeyCode::Esc => app.ui.open_quit_confirm(),
        _ => {}
    }
}

fn activate(app: &mut App) {
    let Screen::Login(flow) = &mut app.screen else {
        return;
    };
    match flow.focus {
        LoginFocus::Contact => flow.focus = LoginFocus::Password,
        LoginFocus::Password | LoginFocus::Submit => {
            flow.submit(&mut app.backend);
        }
        LoginFocus::RememberMe => flow.remember_me = !flow.remember_me,
        LoginFocus::ForgotPassword => app.open_forgot_password(),
        LoginFocus::Google => app.sign_in_with(AuthProvider::Google),
        LoginFocus::Facebook => app.sign_in_with(AuthProvider::Facebook),
        LoginFocus::SignUp => app.toggle_auth(),
        LoginFocus::SkipDemo => app.skip_to_demo(),
    }
}

fn handle_otp_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.resend_otp(),
        KeyCode::Enter => app.verify_otp(),
        KeyCode::Esc => {
            if let Screen::Login(flow) = &mut app.screen {
                flow.back_to_credentials();
            }
        }
        KeyCode::Backspace => {
            if let Some(otp) = otp_state(app) {
                otp.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(otp) = otp_state(app) {
                otp.push(c);
            }
        }
        _ => {}
    }
}

fn otp_state(app: &mut App) -> Option<&mut OtpChallengeState> {
    match &mut app.screen {
        Screen::Login(flow) => flow.otp_mut(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Screen;
    use crate::handlers::test_support::*;
    use crate::state::{AppMode, LoginFocus, LoginPhase};
    use crossterm::event::KeyCode;

    fn login_phase_is_challenge(app: &crate::app::App) -> bool {
        matches!(&app.screen, Screen::Login(flow) if matches!(flow.phase(), LoginPhase::Challenge { .. }))
    }

    #[tokio::test(start_paused = true)]
    async fn keyboard_login_reaches_home() {
        let (mut app, mut rx) = app();
        type_text(&mut app, "9876543210");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abc123!@");
        press(&mut app, KeyCode::Enter);

        let event = rx.recv().await.unwrap();
        app.handle_backend_event(event);
        assert!(login_phase_is_challenge(&app));

        // First key dismisses the OTP notice
        press(&mut app, KeyCode::Esc);
        let code = match &app.screen {
            Screen::Login(flow) => flow.otp().unwrap().code().to_string(),
            _ => unreachable!(),
        };
        type_text(&mut app, &code);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, AppMode::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn esc_on_otp_returns_to_credentials() {
        let (mut app, mut rx) = app();
        type_text(&mut app, "user@gmail.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abc123!@");
        press(&mut app, KeyCode::Enter);
        let event = rx.recv().await.unwrap();
        app.handle_backend_event(event);
        app.notifications.clear_notification();

        press(&mut app, KeyCode::Esc);
        assert!(!login_phase_is_challenge(&app));
        let Screen::Login(flow) = &app.screen else {
            panic!("expected login");
        };
        assert_eq!(flow.credential.contact, "user@gmail.com");
    }

    #[tokio::test(start_paused = true)]
    async fn ctrl_r_resends_code() {
        let (mut app, mut rx) = app();
        type_text(&mut app, "9876543210");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Abc123!@");
        press(&mut app, KeyCode::Enter);
        let event = rx.recv().await.unwrap();
        app.handle_backend_event(event);
        app.notifications.clear_notification();

        type_text(&mut app, "12");
        ctrl(&mut app, 'r');
        let Screen::Login(flow) = &app.screen else {
            panic!("expected login");
        };
        assert!(flow.otp().unwrap().input.is_empty());
        assert!(app.notifications.current.is_some());
    }

    #[tokio::test]
    async fn sign_up_link_toggles_screen() {
        let (mut app, _rx) = app();
        if let Screen::Login(flow) = &mut app.screen {
            flow.focus = LoginFocus::SignUp;
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, AppMode::Signup);
    }

    #[tokio::test]
    async fn skip_demo_signs_in() {
        let (mut app, _rx) = app();
        if let Screen::Login(flow) = &mut app.screen {
            flow.focus = LoginFocus::SkipDemo;
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.as_ref().unwrap().name, "Demo User");
    }
}
