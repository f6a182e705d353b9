use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle global shortcuts that work on every screen
pub fn handle_global_shortcuts(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.ui.open_quit_confirm();
            true
        }
        _ => false,
    }
}

/// Shared Tab/Shift+Tab handling. Returns true when the key moved focus.
pub fn cycle_focus<F: Copy>(key: KeyEvent, focus: &mut F, next: fn(F) -> F, prev: fn(F) -> F) -> bool {
    match key.code {
        KeyCode::Tab => {
            *focus = next(*focus);
            true
        }
        KeyCode::BackTab => {
            *focus = prev(*focus);
            true
        }
        _ => false,
    }
}
