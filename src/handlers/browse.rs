use crate::app::{App, Screen};
use crate::state::{HomePane, HomeState, NavItem, NavbarAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle input on the signed-in home screen
pub fn handle_home_input(key: KeyEvent, app: &mut App) {
    let Screen::Home(home) = &mut app.screen else {
        return;
    };

    match key.code {
        KeyCode::Tab => {
            home.navbar.close_dropdowns();
            home.pane = home.pane.next();
            return;
        }
        KeyCode::BackTab => {
            home.navbar.close_dropdowns();
            home.pane = home.pane.prev();
            return;
        }
        _ => {}
    }

    let dropdown_was_open = home.navbar.dropdown_open();
    let action = match home.pane {
        HomePane::Navbar => handle_navbar(key, home),
        HomePane::Filters => {
            handle_filters(key, home);
            NavbarAction::None
        }
        HomePane::Listings => {
            handle_listings(key, home);
            NavbarAction::None
        }
    };

    match action {
        NavbarAction::Sell => app.sell(),
        NavbarAction::Logout => app.logout(),
        NavbarAction::None => {
            if key.code == KeyCode::Esc && !dropdown_was_open {
                app.ui.open_quit_confirm();
            }
        }
    }
}

fn handle_navbar(key: KeyEvent, home: &mut HomeState) -> NavbarAction {
    let nav = &mut home.navbar;
    if nav.dropdown_open() {
        match key.code {
            KeyCode::Up => nav.dropdown_up(),
            KeyCode::Down => nav.dropdown_down(),
            KeyCode::Enter => return nav.activate(),
            KeyCode::Esc => nav.close_dropdowns(),
            _ => {}
        }
        return NavbarAction::None;
    }

    match key.code {
        KeyCode::Left => nav.focus_prev(),
        KeyCode::Right => nav.focus_next(),
        KeyCode::Enter => return nav.activate(),
        KeyCode::Char(c) if nav.focus == NavItem::Search && !key.modifiers.contains(KeyModifiers::CONTROL) => {
            home.search_push(c);
        }
        KeyCode::Backspace if nav.focus == NavItem::Search => home.search_pop(),
        _ => {}
    }
    NavbarAction::None
}

fn handle_filters(key: KeyEvent, home: &mut HomeState) {
    match key.code {
        KeyCode::Up => home.filters.cursor_up(),
        KeyCode::Down => home.filters.cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => home.activate_filter(),
        KeyCode::Char('c') => {
            home.filters.clear_all();
            home.clamp_selection();
        }
        _ => {}
    }
}

fn handle_listings(key: KeyEvent, home: &mut HomeState) {
    match key.code {
        KeyCode::Left => home.move_selection(-1, 0),
        KeyCode::Right => home.move_selection(1, 0),
        KeyCode::Up => home.move_selection(0, -1),
        KeyCode::Down => home.move_selection(0, 1),
        KeyCode::Char('s') => home.cycle_sort(),
        KeyCode::Char('/') => {
            home.pane = HomePane::Navbar;
            home.navbar.focus = NavItem::Search;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, Screen};
    use crate::handlers::test_support::*;
    use crate::state::{AppMode, HomePane, HomeState, NavItem, SortOrder};
    use crossterm::event::KeyCode;

    fn signed_in() -> (App, tokio::sync::mpsc::UnboundedReceiver<crate::services::BackendEvent>) {
        let (mut app, rx) = app();
        app.skip_to_demo();
        app.notifications.clear_notification();
        (app, rx)
    }

    fn home(app: &App) -> &HomeState {
        match &app.screen {
            Screen::Home(home) => home,
            _ => panic!("expected home"),
        }
    }

    #[tokio::test]
    async fn tab_cycles_panes() {
        let (mut app, _rx) = signed_in();
        assert_eq!(home(&app).pane, HomePane::Listings);
        press(&mut app, KeyCode::Tab);
        assert_eq!(home(&app).pane, HomePane::Navbar);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(home(&app).pane, HomePane::Listings);
    }

    #[tokio::test]
    async fn slash_jumps_to_search() {
        let (mut app, _rx) = signed_in();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "honda");
        let home = home(&app);
        assert_eq!(home.navbar.focus, NavItem::Search);
        assert_eq!(home.visible_listings().len(), 1);
    }

    #[tokio::test]
    async fn sort_key_cycles_order() {
        let (mut app, _rx) = signed_in();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(home(&app).sort, SortOrder::PriceLowHigh);
    }

    #[tokio::test]
    async fn logout_from_account_menu() {
        let (mut app, _rx) = signed_in();
        press(&mut app, KeyCode::Tab);
        if let Screen::Home(home) = &mut app.screen {
            home.navbar.focus = NavItem::Account;
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ui.mode, AppMode::Login);
        assert!(app.session.is_none());
    }

    #[tokio::test]
    async fn esc_closes_dropdown_before_asking_to_quit() {
        let (mut app, _rx) = signed_in();
        press(&mut app, KeyCode::Tab);
        if let Screen::Home(home) = &mut app.screen {
            home.navbar.focus = NavItem::Location;
        }
        press(&mut app, KeyCode::Enter);
        assert!(home(&app).navbar.location_open);
        press(&mut app, KeyCode::Esc);
        assert!(!home(&app).navbar.location_open);
        assert!(!app.ui.show_quit_confirm);
        press(&mut app, KeyCode::Esc);
        assert!(app.ui.show_quit_confirm);
    }
}
