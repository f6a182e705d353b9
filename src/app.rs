use crate::config::ClientConfig;
use crate::desktop_notifications::DesktopNotificationService;
use crate::model::{AuthProvider, AuthenticatedUser};
use crate::services::backend::{BackendEvent, MockBackend};
use crate::services::contact::ContactValidator;
use crate::services::otp::OtpCode;
use crate::services::username::UsernameRegistry;
use crate::state::{
    AppMode, ForgotPasswordFlow, HomeState, LoginFlow, LoginUpdate, NoticeLevel, NoticeTimeouts, NotificationState,
    SignupFlow, UiState,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// The screen currently shown. Only one flow exists at a time, and replacing
/// it drops the old one along with any backend call it still had in flight.
#[derive(Debug)]
pub enum Screen {
    Login(LoginFlow),
    Signup(SignupFlow),
    ForgotPassword(ForgotPasswordFlow),
    Home(HomeState),
}

impl Screen {
    pub fn mode(&self) -> AppMode {
        match self {
            Screen::Login(_) => AppMode::Login,
            Screen::Signup(_) => AppMode::Signup,
            Screen::ForgotPassword(_) => AppMode::ForgotPassword,
            Screen::Home(_) => AppMode::Home,
        }
    }
}

pub struct App {
    pub ui: UiState,
    pub screen: Screen,
    pub session: Option<AuthenticatedUser>,
    pub notifications: NotificationState,
    pub backend: MockBackend,
    pub config: ClientConfig,
    pub desktop: DesktopNotificationService,
    pub rng: StdRng,
    usernames: UsernameRegistry,
}

impl App {
    pub fn new(config: ClientConfig, backend_events: UnboundedSender<BackendEvent>) -> Self {
        let usernames = UsernameRegistry::default();
        let backend = MockBackend::new(backend_events, config.delays.clone(), usernames.clone());
        let desktop = DesktopNotificationService::new(config.desktop_notifications_enabled);
        let login = LoginFlow::new(ContactValidator::new(config.login_email_policy()));
        Self {
            ui: UiState::default(),
            screen: Screen::Login(login),
            session: None,
            notifications: NotificationState::default(),
            backend,
            config,
            desktop,
            rng: StdRng::from_entropy(),
            usernames,
        }
    }

    fn login_validator(&self) -> ContactValidator {
        ContactValidator::new(self.config.login_email_policy())
    }

    fn set_screen(&mut self, screen: Screen) {
        debug!("Switching screen to {:?}", screen.mode());
        self.ui.set_mode(screen.mode());
        self.screen = screen;
    }

    pub fn set_notification(&mut self, message: impl Into<String>, level: NoticeLevel, ms: Option<u64>) {
        self.notifications
            .set_notification(message, level, ms, self.ui.tick_count);
    }

    /// Entry point for every successful sign-in path.
    pub fn on_auth_success(&mut self, user: AuthenticatedUser) {
        info!("Signed in as {} <{}> via {:?}", user.name, user.email, user.provider);
        let welcome = format!("Welcome, {}!", user.name);
        self.session = Some(user);
        let home = HomeState::new(self.config.default_city.clone(), Utc::now());
        self.set_screen(Screen::Home(home));
        self.set_notification(welcome, NoticeLevel::Success, Some(NoticeTimeouts::SHORT));
    }

    /// Switches between the login and signup screens.
    pub fn toggle_auth(&mut self) {
        let next = match self.screen {
            Screen::Login(_) => Screen::Signup(SignupFlow::new(ContactValidator::any_email(), self.usernames.clone())),
            _ => Screen::Login(LoginFlow::new(self.login_validator())),
        };
        self.set_screen(next);
    }

    pub fn back_to_login(&mut self) {
        self.set_screen(Screen::Login(LoginFlow::new(self.login_validator())));
    }

    pub fn open_forgot_password(&mut self) {
        self.set_screen(Screen::ForgotPassword(ForgotPasswordFlow::new(self.login_validator())));
    }

    pub fn skip_to_demo(&mut self) {
        self.on_auth_success(AuthenticatedUser::demo());
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.take() {
            info!("{} logged out", user.name);
        }
        self.back_to_login();
        self.set_notification("You have been logged out", NoticeLevel::Info, Some(NoticeTimeouts::SHORT));
    }

    pub fn sell(&mut self) {
        self.set_notification(
            "Posting ads is not available in this demo",
            NoticeLevel::Info,
            Some(NoticeTimeouts::SHORT),
        );
    }

    pub fn sign_in_with(&mut self, provider: AuthProvider) {
        match &mut self.screen {
            Screen::Login(flow) => flow.sign_in_with(provider, &mut self.backend),
            Screen::Signup(flow) => flow.sign_up_with(provider, &mut self.backend),
            _ => {}
        }
    }

    /// Surfaces a freshly issued demo code the way a real SMS or mail would.
    fn announce_otp(&mut self, destination: &str, code: &OtpCode) {
        info!("Demo OTP for {} is {}", destination, code);
        self.desktop.show_otp_notification(destination, code.as_str());
        self.set_notification(
            format!("Demo: OTP sent to {}. Your OTP is: {}", destination, code),
            NoticeLevel::Info,
            None,
        );
    }

    pub fn resend_otp(&mut self) {
        let Screen::Login(flow) = &mut self.screen else {
            return;
        };
        if let Some((destination, code)) = flow.resend_otp(&mut self.rng) {
            self.announce_otp(&destination, &code);
        }
    }

    pub fn verify_otp(&mut self) {
        let Screen::Login(flow) = &mut self.screen else {
            return;
        };
        if let Some(user) = flow.verify_otp() {
            self.on_auth_success(user);
        }
    }

    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match &mut self.screen {
            Screen::Login(flow) => match flow.handle_event(&event, &mut self.rng) {
                LoginUpdate::OtpSent { destination, code } => self.announce_otp(&destination, &code),
                LoginUpdate::SignedIn(user) => self.on_auth_success(user),
                LoginUpdate::Ignored => debug!("Login screen ignored {:?}", event.task),
            },
            Screen::Signup(flow) => {
                if let Some(user) = flow.handle_event(&event) {
                    self.on_auth_success(user);
                }
            }
            Screen::ForgotPassword(flow) => {
                if let Some(destination) = flow.handle_event(&event) {
                    info!("Password reset instructions sent to {}", destination);
                    self.desktop.show_password_reset_notification(&destination);
                    self.set_notification(
                        format!("Password reset instructions sent to {}", destination),
                        NoticeLevel::Success,
                        Some(NoticeTimeouts::LONG),
                    );
                }
            }
            Screen::Home(_) => debug!("Dropping backend event {:?} on the home screen", event.task),
        }
    }

    pub fn on_tick(&mut self) {
        self.ui.tick();
        if self.notifications.should_close_notification(self.ui.tick_count) {
            self.notifications.clear_notification();
        }
    }
}
