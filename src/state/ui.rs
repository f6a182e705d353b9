/// Length of one UI tick driven by the event loop.
pub const TICK_MS: u64 = 50;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AppMode {
    Login,
    Signup,
    ForgotPassword,
    Home,
}

/// State management for UI-specific state
#[derive(Debug)]
pub struct UiState {
    pub mode: AppMode,
    pub should_quit: bool,
    pub tick_count: u64,

    // Quit confirmation
    pub show_quit_confirm: bool,
    pub quit_confirm_selected: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: AppMode::Login,
            should_quit: false,
            tick_count: 0,
            show_quit_confirm: false,
            quit_confirm_selected: 0,
        }
    }
}

impl UiState {
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn open_quit_confirm(&mut self) {
        self.show_quit_confirm = true;
        self.quit_confirm_selected = 1; // Default to "No"
    }

    /// Frame of a four-step spinner for loading indicators.
    pub fn spinner(&self) -> char {
        ['|', '/', '-', '\\'][(self.tick_count / 2 % 4) as usize]
    }
}
