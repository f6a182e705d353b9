use crate::model::{AuthProvider, AuthenticatedUser, Credential};
use crate::services::backend::{BackendEvent, BackendOutcome, BackendRequest, MockBackend, TaskHandle};
use crate::services::contact::{Contact, ContactValidator};
use crate::services::otp::OtpCode;
use crate::services::password;
use crate::state::otp::OtpChallengeState;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFocus {
    Contact,
    Password,
    RememberMe,
    Submit,
    ForgotPassword,
    Google,
    Facebook,
    SignUp,
    SkipDemo,
}

impl LoginFocus {
    const ORDER: [LoginFocus; 9] = [
        LoginFocus::Contact,
        LoginFocus::Password,
        LoginFocus::RememberMe,
        LoginFocus::Submit,
        LoginFocus::ForgotPassword,
        LoginFocus::Google,
        LoginFocus::Facebook,
        LoginFocus::SignUp,
        LoginFocus::SkipDemo,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug)]
pub enum LoginPhase {
    Credentials,
    Dispatching { task: TaskHandle, contact: Contact },
    Challenge { contact: Contact, otp: OtpChallengeState },
    Success,
}

/// What a backend completion meant for the login screen.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginUpdate {
    Ignored,
    OtpSent { destination: String, code: OtpCode },
    SignedIn(AuthenticatedUser),
}

/// Login screen controller: credentials, simulated dispatch, then the OTP challenge.
#[derive(Debug)]
pub struct LoginFlow {
    pub credential: Credential,
    pub focus: LoginFocus,
    pub remember_me: bool,
    pub contact_error: Option<String>,
    pub password_error: Option<String>,
    phase: LoginPhase,
    social: Option<(TaskHandle, AuthProvider)>,
    contacts: ContactValidator,
}

impl LoginFlow {
    pub fn new(contacts: ContactValidator) -> Self {
        Self {
            credential: Credential::default(),
            focus: LoginFocus::Contact,
            remember_me: false,
            contact_error: None,
            password_error: None,
            phase: LoginPhase::Credentials,
            social: None,
            contacts,
        }
    }

    pub fn phase(&self) -> &LoginPhase {
        &self.phase
    }

    pub fn contacts(&self) -> &ContactValidator {
        &self.contacts
    }

    pub fn otp(&self) -> Option<&OtpChallengeState> {
        match &self.phase {
            LoginPhase::Challenge { otp, .. } => Some(otp),
            _ => None,
        }
    }

    pub fn otp_mut(&mut self) -> Option<&mut OtpChallengeState> {
        match &mut self.phase {
            LoginPhase::Challenge { otp, .. } => Some(otp),
            _ => None,
        }
    }

    pub fn is_dispatching(&self) -> bool {
        matches!(self.phase, LoginPhase::Dispatching { .. })
    }

    pub fn pending_social(&self) -> Option<AuthProvider> {
        self.social.as_ref().map(|(_, provider)| *provider)
    }

    /// Credential fields are editable only before anything is in flight.
    pub fn accepts_credential_input(&self) -> bool {
        matches!(self.phase, LoginPhase::Credentials) && self.social.is_none()
    }

    pub fn input_char(&mut self, c: char) {
        if !self.accepts_credential_input() {
            return;
        }
        match self.focus {
            LoginFocus::Contact => {
                self.credential.contact.push(c);
                self.contact_error = None;
            }
            LoginFocus::Password => {
                self.credential.password.push(c);
                self.password_error = None;
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if !self.accepts_credential_input() {
            return;
        }
        match self.focus {
            LoginFocus::Contact => {
                self.credential.contact.pop();
                self.contact_error = None;
            }
            LoginFocus::Password => {
                self.credential.password.pop();
                self.password_error = None;
            }
            _ => {}
        }
    }

    /// Validates the contact, then the password. Only when both pass is the
    /// OTP dispatch started. Returns whether it was.
    pub fn submit(&mut self, backend: &mut MockBackend) -> bool {
        if !self.accepts_credential_input() {
            return false;
        }
        let contact = match self.contacts.parse(&self.credential.contact) {
            Ok(contact) => contact,
            Err(e) => {
                debug!("Login contact rejected: {}", e);
                self.contact_error = Some(self.contacts.summary_message());
                return false;
            }
        };
        if let Err(e) = password::check(&self.credential.password) {
            self.password_error = Some(e.to_string());
            return false;
        }

        self.contact_error = None;
        self.password_error = None;
        let destination = contact.destination();
        info!("Dispatching OTP to {}", destination);
        let task = backend.spawn(BackendRequest::DispatchOtp { destination });
        self.phase = LoginPhase::Dispatching { task, contact };
        true
    }

    pub fn sign_in_with(&mut self, provider: AuthProvider, backend: &mut MockBackend) {
        if !self.accepts_credential_input() {
            return;
        }
        info!("Starting {:?} sign-in", provider);
        let task = backend.spawn(BackendRequest::SocialSignIn { provider });
        self.social = Some((task, provider));
    }

    pub fn handle_event<R: Rng + ?Sized>(&mut self, event: &BackendEvent, rng: &mut R) -> LoginUpdate {
        if let Some((task, _)) = &self.social {
            if task.id() == event.task {
                if let BackendOutcome::SocialSignedIn { user } = &event.outcome {
                    self.social = None;
                    self.phase = LoginPhase::Success;
                    return LoginUpdate::SignedIn(user.clone());
                }
            }
        }

        let LoginPhase::Dispatching { task, .. } = &self.phase else {
            return LoginUpdate::Ignored;
        };
        if task.id() != event.task {
            debug!("Ignoring stale backend event {:?}", event.task);
            return LoginUpdate::Ignored;
        }
        let BackendOutcome::OtpDispatched { destination } = &event.outcome else {
            return LoginUpdate::Ignored;
        };

        let previous = std::mem::replace(&mut self.phase, LoginPhase::Credentials);
        let LoginPhase::Dispatching { contact, .. } = previous else {
            return LoginUpdate::Ignored;
        };
        let otp = OtpChallengeState::issue(destination.clone(), rng);
        let code = otp.code().clone();
        self.phase = LoginPhase::Challenge { contact, otp };
        LoginUpdate::OtpSent {
            destination: destination.clone(),
            code,
        }
    }

    /// On a matching code the flow ends and the signed-in user is returned, once.
    pub fn verify_otp(&mut self) -> Option<AuthenticatedUser> {
        let LoginPhase::Challenge { contact, otp } = &mut self.phase else {
            return None;
        };
        if !otp.verify() {
            return None;
        }
        let user = AuthenticatedUser {
            name: contact.display_name(),
            email: contact.account_email(),
            contact: Some(contact.destination()),
            username: None,
            profile_image: None,
            provider: AuthProvider::Otp,
        };
        info!("OTP verified for {}", user.email);
        self.phase = LoginPhase::Success;
        Some(user)
    }

    pub fn resend_otp<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(String, OtpCode)> {
        let otp = self.otp_mut()?;
        let code = otp.resend(rng).clone();
        Some((otp.destination().to_string(), code))
    }

    /// Drops the challenge and returns to the credential form, keeping what was typed.
    pub fn back_to_credentials(&mut self) {
        if matches!(self.phase, LoginPhase::Challenge { .. }) {
            debug!("Leaving OTP challenge");
            self.phase = LoginPhase::Credentials;
            self.focus = LoginFocus::Contact;
        }
    }
}
