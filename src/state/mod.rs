pub mod auth;
pub mod browse;
pub mod forgot;
pub mod notification;
pub mod otp;
pub mod signup;
pub mod ui;

pub use auth::{LoginFlow, LoginFocus, LoginPhase, LoginUpdate};
pub use browse::{FilterKind, FilterRow, HomePane, HomeState, NavItem, NavbarAction, SortOrder};
pub use forgot::{ForgotFocus, ForgotPasswordFlow, ForgotPhase};
pub use notification::{NoticeLevel, NotificationState};
pub use otp::OtpChallengeState;
pub use signup::{SignupFocus, SignupFlow};
pub use ui::{AppMode, UiState};

/// Timeouts for in-app notices, in milliseconds
pub struct NoticeTimeouts;

impl NoticeTimeouts {
    pub const SHORT: u64 = 2500;
    pub const LONG: u64 = 4000;
}
