use crate::state::ui::TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    /// Tick at which the notice closes by itself; `None` waits for a key press.
    pub close_tick: Option<u64>,
}

/// State management for notifications
#[derive(Debug, Default)]
pub struct NotificationState {
    pub current: Option<Notice>,
}

impl NotificationState {
    pub fn set_notification(
        &mut self,
        message: impl Into<String>,
        level: NoticeLevel,
        ms: Option<u64>,
        tick_count: u64,
    ) {
        let close_tick = ms.map(|duration| tick_count + duration.div_ceil(TICK_MS));
        self.current = Some(Notice {
            message: message.into(),
            level,
            close_tick,
        });
    }

    pub fn clear_notification(&mut self) {
        self.current = None;
    }

    pub fn should_close_notification(&self, tick_count: u64) -> bool {
        matches!(&self.current, Some(Notice { close_tick: Some(close), .. }) if tick_count >= *close)
    }
}
