use crate::model::{AuthProvider, AuthenticatedUser, SignupForm};
use crate::services::backend::{BackendEvent, BackendOutcome, BackendRequest, MockBackend, TaskHandle};
use crate::services::contact::ContactValidator;
use crate::services::image::ImageService;
use crate::services::signup::{self, SignupErrors, SignupField};
use crate::services::username::{Availability, UsernameError, UsernameRegistry};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupFocus {
    Contact,
    Username,
    ProfileImage,
    Password,
    ConfirmPassword,
    Submit,
    Google,
    SignIn,
}

impl SignupFocus {
    const ORDER: [SignupFocus; 8] = [
        SignupFocus::Contact,
        SignupFocus::Username,
        SignupFocus::ProfileImage,
        SignupFocus::Password,
        SignupFocus::ConfirmPassword,
        SignupFocus::Submit,
        SignupFocus::Google,
        SignupFocus::SignIn,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text_field(self) -> bool {
        matches!(
            self,
            SignupFocus::Contact
                | SignupFocus::Username
                | SignupFocus::ProfileImage
                | SignupFocus::Password
                | SignupFocus::ConfirmPassword
        )
    }
}

#[derive(Debug)]
struct UsernameCheck {
    task: TaskHandle,
    username: String,
}

/// Account creation screen. Owns its in-flight calls, so dropping the flow
/// cancels any pending username check or account creation.
#[derive(Debug)]
pub struct SignupFlow {
    pub form: SignupForm,
    pub image_path: String,
    pub focus: SignupFocus,
    pub errors: SignupErrors,
    username_check: Option<UsernameCheck>,
    last_availability: Option<(String, Availability)>,
    creating: Option<TaskHandle>,
    social: Option<TaskHandle>,
    contacts: ContactValidator,
    usernames: UsernameRegistry,
}

impl SignupFlow {
    pub fn new(contacts: ContactValidator, usernames: UsernameRegistry) -> Self {
        Self {
            form: SignupForm::default(),
            image_path: String::new(),
            focus: SignupFocus::Contact,
            errors: SignupErrors::default(),
            username_check: None,
            last_availability: None,
            creating: None,
            social: None,
            contacts,
            usernames,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.creating.is_some() || self.social.is_some()
    }

    pub fn is_creating(&self) -> bool {
        self.creating.is_some()
    }

    pub fn is_checking_username(&self) -> bool {
        self.username_check.is_some()
    }

    /// Result of the most recent live check, if it still describes the field.
    pub fn username_availability(&self) -> Option<Availability> {
        match &self.last_availability {
            Some((name, availability)) if *name == self.form.username => Some(*availability),
            _ => None,
        }
    }

    pub fn contact_hint(&self) -> String {
        self.contacts.hint()
    }

    pub fn input_char(&mut self, c: char, backend: &mut MockBackend) {
        if self.is_busy() {
            return;
        }
        match self.focus {
            SignupFocus::Contact => {
                self.form.contact.push(c);
                self.errors.clear(SignupField::Contact);
            }
            SignupFocus::Username => {
                self.form.username.push(c);
                self.username_edited(backend);
            }
            SignupFocus::ProfileImage => {
                self.image_path.push(c);
                self.image_path_edited();
            }
            SignupFocus::Password => {
                self.form.password.push(c);
                self.errors.clear(SignupField::Password);
            }
            SignupFocus::ConfirmPassword => {
                self.form.confirm_password.push(c);
                self.errors.clear(SignupField::ConfirmPassword);
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self, backend: &mut MockBackend) {
        if self.is_busy() {
            return;
        }
        match self.focus {
            SignupFocus::Contact => {
                self.form.contact.pop();
                self.errors.clear(SignupField::Contact);
            }
            SignupFocus::Username => {
                self.form.username.pop();
                self.username_edited(backend);
            }
            SignupFocus::ProfileImage => {
                self.image_path.pop();
                self.image_path_edited();
            }
            SignupFocus::Password => {
                self.form.password.pop();
                self.errors.clear(SignupField::Password);
            }
            SignupFocus::ConfirmPassword => {
                self.form.confirm_password.pop();
                self.errors.clear(SignupField::ConfirmPassword);
            }
            _ => {}
        }
    }

    /// Any edit supersedes the pending check; a new one is scheduled once the
    /// name is long enough to be worth asking about.
    fn username_edited(&mut self, backend: &mut MockBackend) {
        self.errors.clear(SignupField::Username);
        self.username_check = None;
        if UsernameRegistry::should_check_live(&self.form.username) {
            let username = self.form.username.clone();
            let task = backend.spawn(BackendRequest::CheckUsername {
                username: username.clone(),
            });
            self.username_check = Some(UsernameCheck { task, username });
        }
    }

    fn image_path_edited(&mut self) {
        self.form.profile_image = None;
        self.errors.clear(SignupField::ProfileImage);
    }

    /// Loads the typed path as the profile image. Returns whether it loaded.
    pub fn load_image(&mut self) -> bool {
        let path = self.image_path.trim();
        if path.is_empty() {
            self.form.profile_image = None;
            return false;
        }
        match ImageService::load_profile_image(Path::new(path)) {
            Ok(image) => {
                info!("Loaded profile image {} ({})", image.file_name, image.mime_type);
                self.form.profile_image = Some(image);
                self.errors.clear(SignupField::ProfileImage);
                true
            }
            Err(e) => {
                warn!("Profile image rejected: {}", e);
                self.form.profile_image = None;
                self.errors.set(SignupField::ProfileImage, e.to_string());
                false
            }
        }
    }

    /// Validates every field and, if all pass, starts account creation.
    pub fn submit(&mut self, backend: &mut MockBackend) -> bool {
        if self.is_busy() {
            return false;
        }
        if self.form.profile_image.is_none() && !self.image_path.trim().is_empty() {
            self.load_image();
        }
        let image_error = self.errors.get(SignupField::ProfileImage).map(str::to_string);

        match signup::validate(&self.form, &self.contacts, &self.usernames) {
            Ok(registration) => {
                self.errors = SignupErrors::default();
                info!("Creating account for {}", registration.username);
                self.username_check = None;
                self.creating = Some(backend.spawn(BackendRequest::CreateAccount { registration }));
                true
            }
            Err(mut errors) => {
                if let Some(message) = image_error {
                    errors.set(SignupField::ProfileImage, message);
                }
                debug!("Signup form has {} invalid field(s)", errors.len());
                self.errors = errors;
                false
            }
        }
    }

    pub fn sign_up_with(&mut self, provider: AuthProvider, backend: &mut MockBackend) {
        if self.is_busy() {
            return;
        }
        info!("Starting {:?} sign-up", provider);
        self.social = Some(backend.spawn(BackendRequest::SocialSignIn { provider }));
    }

    /// Returns the new user once account creation or social sign-up completes.
    pub fn handle_event(&mut self, event: &BackendEvent) -> Option<AuthenticatedUser> {
        match &event.outcome {
            BackendOutcome::UsernameChecked { username, availability } => {
                self.apply_username_check(event, username, *availability);
                None
            }
            BackendOutcome::AccountCreated { user } => {
                let current = self.creating.as_ref().map(TaskHandle::id);
                if current != Some(event.task) {
                    return None;
                }
                self.creating = None;
                Some(user.clone())
            }
            BackendOutcome::SocialSignedIn { user } => {
                let current = self.social.as_ref().map(TaskHandle::id);
                if current != Some(event.task) {
                    return None;
                }
                self.social = None;
                Some(user.clone())
            }
            _ => None,
        }
    }

    fn apply_username_check(&mut self, event: &BackendEvent, username: &str, availability: Availability) {
        let Some(check) = &self.username_check else {
            return;
        };
        if check.task.id() != event.task || check.username != self.form.username || username != check.username {
            debug!("Ignoring stale username check for {}", username);
            return;
        }
        self.username_check = None;
        self.last_availability = Some((username.to_string(), availability));

        let taken = UsernameError::Taken.to_string();
        match availability {
            Availability::Taken => self.errors.set(SignupField::Username, taken),
            Availability::Available => {
                if self.errors.get(SignupField::Username) == Some(taken.as_str()) {
                    self.errors.clear(SignupField::Username);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::model::ProfileImage;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn setup() -> (SignupFlow, MockBackend, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = MockBackend::new(tx, Delays::default(), UsernameRegistry::default());
        let flow = SignupFlow::new(ContactValidator::any_email(), UsernameRegistry::default());
        (flow, backend, rx)
    }

    fn type_username(flow: &mut SignupFlow, backend: &mut MockBackend, text: &str) {
        flow.focus = SignupFocus::Username;
        for c in text.chars() {
            flow.input_char(c, backend);
        }
    }

    fn image() -> ProfileImage {
        ProfileImage {
            file_name: "me.png".to_string(),
            mime_type: "image/png".to_string(),
            size_bytes: 64,
            dimensions: Some((8, 8)),
            preview: "data:image/png;base64,AAAA".to_string(),
        }
    }

    fn fill_valid(flow: &mut SignupFlow) {
        flow.form = SignupForm {
            contact: "ravi@example.com".to_string(),
            username: "ravi_k".to_string(),
            profile_image: Some(image()),
            password: "Abc123!@".to_string(),
            confirm_password: "Abc123!@".to_string(),
        };
    }

    #[tokio::test(start_paused = true)]
    async fn taken_username_is_flagged_after_debounce() {
        let (mut flow, mut backend, mut rx) = setup();
        type_username(&mut flow, &mut backend, "admin");

        let event = rx.recv().await.unwrap();
        flow.handle_event(&event);
        assert_eq!(flow.errors.get(SignupField::Username), Some("Username is already taken"));
        assert_eq!(flow.username_availability(), Some(Availability::Taken));
        assert!(!flow.is_checking_username());
    }

    #[tokio::test(start_paused = true)]
    async fn each_keystroke_supersedes_the_pending_check() {
        let (mut flow, mut backend, mut rx) = setup();
        type_username(&mut flow, &mut backend, "admin_2");

        let event = rx.recv().await.unwrap();
        let BackendOutcome::UsernameChecked { username, availability } = &event.outcome else {
            panic!("expected a username check");
        };
        assert_eq!(username, "admin_2");
        assert_eq!(*availability, Availability::Available);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_result_does_not_touch_the_field() {
        let (mut flow, mut backend, mut rx) = setup();
        type_username(&mut flow, &mut backend, "admin");
        let stale = rx.recv().await.unwrap();

        flow.input_char('x', &mut backend);
        flow.handle_event(&stale);
        assert_eq!(flow.errors.get(SignupField::Username), None);
        assert!(flow.is_checking_username());
        assert_eq!(flow.username_availability(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn short_usernames_are_not_checked_live() {
        let (mut flow, mut backend, mut rx) = setup();
        type_username(&mut flow, &mut backend, "ab");
        assert!(!flow.is_checking_username());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn available_result_only_clears_a_taken_error() {
        let (mut flow, mut backend, mut rx) = setup();
        type_username(&mut flow, &mut backend, "ravi");
        flow.errors.set(SignupField::Username, "Username is already taken");
        let event = rx.recv().await.unwrap();
        flow.handle_event(&event);
        assert_eq!(flow.errors.get(SignupField::Username), None);

        type_username(&mut flow, &mut backend, "!");
        flow.errors.set(SignupField::Username, "Username can only contain letters, numbers and underscore");
        let event = rx.recv().await.unwrap();
        flow.handle_event(&event);
        assert_eq!(
            flow.errors.get(SignupField::Username),
            Some("Username can only contain letters, numbers and underscore")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn mismatched_confirmation_blocks_submit() {
        let (mut flow, mut backend, mut rx) = setup();
        fill_valid(&mut flow);
        flow.form.confirm_password = "Abc123!X".to_string();

        assert!(!flow.submit(&mut backend));
        assert_eq!(flow.errors.get(SignupField::ConfirmPassword), Some("Passwords do not match"));
        assert!(!flow.is_creating());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn valid_form_creates_account() {
        let (mut flow, mut backend, mut rx) = setup();
        fill_valid(&mut flow);

        assert!(flow.submit(&mut backend));
        assert!(flow.is_creating());
        let event = rx.recv().await.unwrap();
        let user = flow.handle_event(&event).unwrap();
        assert_eq!(user.name, "ravi_k");
        assert_eq!(user.username.as_deref(), Some("ravi_k"));
        assert_eq!(user.email, "ravi@example.com");
        assert_eq!(user.profile_image.as_deref(), Some("data:image/png;base64,AAAA"));
        assert!(!flow.is_creating());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_form_reports_every_field() {
        let (mut flow, mut backend, _rx) = setup();
        assert!(!flow.submit(&mut backend));
        assert_eq!(flow.errors.get(SignupField::Contact), Some("Email or contact number is required"));
        assert_eq!(flow.errors.get(SignupField::Username), Some("Username is required"));
        assert_eq!(flow.errors.get(SignupField::ProfileImage), Some("Profile image is required"));
        assert_eq!(flow.errors.get(SignupField::Password), Some("Password is required"));
    }

    #[tokio::test(start_paused = true)]
    async fn unreadable_image_path_keeps_its_specific_error() {
        let (mut flow, mut backend, _rx) = setup();
        fill_valid(&mut flow);
        flow.form.profile_image = None;
        flow.image_path = "/definitely/not/here.png".to_string();

        assert!(!flow.submit(&mut backend));
        let message = flow.errors.get(SignupField::ProfileImage).unwrap();
        assert_ne!(message, "Profile image is required");
    }

    #[tokio::test(start_paused = true)]
    async fn editing_the_image_path_drops_the_loaded_image() {
        let (mut flow, mut backend, _rx) = setup();
        fill_valid(&mut flow);
        flow.focus = SignupFocus::ProfileImage;
        flow.input_char('a', &mut backend);
        assert!(flow.form.profile_image.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_flow_cancels_account_creation() {
        let (mut flow, mut backend, mut rx) = setup();
        fill_valid(&mut flow);
        flow.submit(&mut backend);
        drop(flow);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn focus_cycles_through_all_controls() {
        let mut focus = SignupFocus::Contact;
        for _ in 0..8 {
            focus = focus.next();
        }
        assert_eq!(focus, SignupFocus::Contact);
        assert_eq!(SignupFocus::Contact.prev(), SignupFocus::SignIn);
    }
}
