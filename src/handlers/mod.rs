pub mod auth;
pub mod browse;
pub mod forgot;
pub mod navigation;
pub mod signup;

use crate::app::{App, Screen};
use crossterm::event::{KeyEvent, KeyEventKind};

/// Main input handler dispatcher
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Handle quit confirmation dialog
    if app.ui.show_quit_confirm {
        handle_quit_confirm_input(key, app);
        return;
    }

    // Handle global shortcuts first
    if navigation::handle_global_shortcuts(key, app) {
        return;
    }

    // Any key press closes an open notice and is consumed
    if app.notifications.current.is_some() {
        app.notifications.clear_notification();
        return;
    }

    match app.screen {
        Screen::Login(_) => auth::handle_login_input(key, app),
        Screen::Signup(_) => signup::handle_signup_input(key, app),
        Screen::ForgotPassword(_) => forgot::handle_forgot_input(key, app),
        Screen::Home(_) => browse::handle_home_input(key, app),
    }
}

fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    use crossterm::event::{KeyCode, KeyModifiers};

    match key.code {
        KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
            app.ui.quit_confirm_selected = if app.ui.quit_confirm_selected == 0 { 1 } else { 0 };
        }
        KeyCode::Enter => {
            if app.ui.quit_confirm_selected == 0 {
                app.ui.quit();
            }
            app.ui.show_quit_confirm = false;
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.ui.quit();
            app.ui.show_quit_confirm = false;
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            app.ui.show_quit_confirm = false;
        }
        // Ctrl+C again closes the dialog
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ui.show_quit_confirm = false;
        }
        _ => {}
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::app::App;
    use crate::config::ClientConfig;
    use crate::services::backend::BackendEvent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    pub fn app() -> (App, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = ClientConfig {
            desktop_notifications_enabled: false,
            ..ClientConfig::default()
        };
        (App::new(config, tx), rx)
    }

    pub fn press(app: &mut App, code: KeyCode) {
        super::handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), app);
    }

    pub fn ctrl(app: &mut App, c: char) {
        super::handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), app);
    }

    pub fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use crossterm::event::KeyCode;

    #[tokio::test]
    async fn ctrl_c_asks_before_quitting() {
        let (mut app, _rx) = app();
        ctrl(&mut app, 'c');
        assert!(app.ui.show_quit_confirm);
        assert_eq!(app.ui.quit_confirm_selected, 1);

        press(&mut app, KeyCode::Enter);
        assert!(!app.ui.should_quit);
        assert!(!app.ui.show_quit_confirm);

        ctrl(&mut app, 'c');
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert!(app.ui.should_quit);
    }

    #[tokio::test]
    async fn open_notice_swallows_the_next_key() {
        let (mut app, _rx) = app();
        app.sell();
        press(&mut app, KeyCode::Char('9'));
        assert!(app.notifications.current.is_none());
        let crate::app::Screen::Login(flow) = &app.screen else {
            panic!("expected login");
        };
        assert!(flow.credential.contact.is_empty());
    }
}
