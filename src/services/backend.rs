//! Stand-in for the marketplace API. Every call is a tokio task that sleeps
//! for a configured delay and then reports back over the app's event channel.
//! Handles abort their task when dropped, so a screen that goes away takes its
//! in-flight calls with it.

use crate::config::Delays;
use crate::model::{AuthProvider, AuthenticatedUser};
use crate::services::signup::Registration;
use crate::services::username::{Availability, UsernameRegistry};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    DispatchOtp { destination: String },
    CheckUsername { username: String },
    CreateAccount { registration: Registration },
    SendPasswordReset { destination: String },
    SocialSignIn { provider: AuthProvider },
}

impl BackendRequest {
    fn name(&self) -> &'static str {
        match self {
            BackendRequest::DispatchOtp { .. } => "dispatch_otp",
            BackendRequest::CheckUsername { .. } => "check_username",
            BackendRequest::CreateAccount { .. } => "create_account",
            BackendRequest::SendPasswordReset { .. } => "send_password_reset",
            BackendRequest::SocialSignIn { .. } => "social_sign_in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOutcome {
    OtpDispatched { destination: String },
    UsernameChecked { username: String, availability: Availability },
    AccountCreated { user: AuthenticatedUser },
    PasswordResetSent { destination: String },
    SocialSignedIn { user: AuthenticatedUser },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendEvent {
    pub task: TaskId,
    pub outcome: BackendOutcome,
}

/// Owns one in-flight call. Dropping it cancels the call.
#[derive(Debug)]
pub struct TaskHandle {
    id: TaskId,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        if !self.join.is_finished() {
            trace!("Cancelling backend task {:?}", self.id);
            self.join.abort();
        }
    }
}

pub struct MockBackend {
    events: UnboundedSender<BackendEvent>,
    delays: Delays,
    usernames: UsernameRegistry,
    next_id: u64,
}

impl MockBackend {
    pub fn new(events: UnboundedSender<BackendEvent>, delays: Delays, usernames: UsernameRegistry) -> Self {
        Self {
            events,
            delays,
            usernames,
            next_id: 0,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn spawn(&mut self, request: BackendRequest) -> TaskHandle {
        self.next_id += 1;
        let id = TaskId(self.next_id);
        let delay = self.delay_for(&request);
        let usernames = self.usernames.clone();
        let events = self.events.clone();
        debug!("Backend call {} ({:?}) scheduled in {:?}", request.name(), id, delay);

        let join = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = resolve(request, &usernames);
            if events.send(BackendEvent { task: id, outcome }).is_err() {
                debug!("Event channel closed before backend task {:?} reported", id);
            }
        });
        TaskHandle { id, join }
    }

    fn delay_for(&self, request: &BackendRequest) -> Duration {
        match request {
            BackendRequest::DispatchOtp { .. } => self.delays.otp_dispatch(),
            BackendRequest::CheckUsername { .. } => self.delays.username_check(),
            BackendRequest::CreateAccount { .. } => self.delays.account_creation(),
            BackendRequest::SendPasswordReset { .. } => self.delays.password_reset(),
            BackendRequest::SocialSignIn { .. } => self.delays.social_sign_in(),
        }
    }
}

/// Every simulated call succeeds.
fn resolve(request: BackendRequest, usernames: &UsernameRegistry) -> BackendOutcome {
    match request {
        BackendRequest::DispatchOtp { destination } => BackendOutcome::OtpDispatched { destination },
        BackendRequest::CheckUsername { username } => {
            let availability = usernames.availability(&username);
            BackendOutcome::UsernameChecked { username, availability }
        }
        BackendRequest::CreateAccount { registration } => BackendOutcome::AccountCreated {
            user: AuthenticatedUser {
                name: registration.username.clone(),
                email: registration.contact.account_email(),
                contact: Some(registration.contact.destination()),
                username: Some(registration.username),
                profile_image: Some(registration.profile_image.preview),
                provider: AuthProvider::Signup,
            },
        },
        BackendRequest::SendPasswordReset { destination } => BackendOutcome::PasswordResetSent { destination },
        BackendRequest::SocialSignIn { provider } => BackendOutcome::SocialSignedIn {
            user: AuthenticatedUser::social(provider),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProfileImage;
    use crate::services::contact::Contact;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn backend() -> (MockBackend, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (MockBackend::new(tx, Delays::default(), UsernameRegistry::default()), rx)
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_reports_after_configured_delay() {
        let (mut backend, mut rx) = backend();
        let start = Instant::now();
        let handle = backend.spawn(BackendRequest::DispatchOtp {
            destination: "+919876543210".to_string(),
        });

        let event = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(event.task, handle.id());
        assert_eq!(
            event.outcome,
            BackendOutcome::OtpDispatched { destination: "+919876543210".to_string() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_call() {
        let (mut backend, mut rx) = backend();
        let handle = backend.spawn(BackendRequest::SendPasswordReset {
            destination: "user@gmail.com".to_string(),
        });
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(handle);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn task_ids_are_unique() {
        let (mut backend, _rx) = backend();
        let a = backend.spawn(BackendRequest::SocialSignIn { provider: AuthProvider::Google });
        let b = backend.spawn(BackendRequest::SocialSignIn { provider: AuthProvider::Google });
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test(start_paused = true)]
    async fn username_check_consults_registry() {
        let (mut backend, mut rx) = backend();
        let _handle = backend.spawn(BackendRequest::CheckUsername { username: "Buyer".to_string() });

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event.outcome,
            BackendOutcome::UsernameChecked {
                username: "Buyer".to_string(),
                availability: Availability::Taken,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn account_creation_builds_user_from_registration() {
        let (mut backend, mut rx) = backend();
        let registration = Registration {
            contact: Contact::Phone("9876543210".to_string()),
            username: "ravi_k".to_string(),
            profile_image: ProfileImage {
                file_name: "me.png".to_string(),
                mime_type: "image/png".to_string(),
                size_bytes: 3,
                dimensions: None,
                preview: "data:image/png;base64,AAA".to_string(),
            },
        };
        let _handle = backend.spawn(BackendRequest::CreateAccount { registration });

        let BackendOutcome::AccountCreated { user } = rx.recv().await.unwrap().outcome else {
            panic!("expected AccountCreated");
        };
        assert_eq!(user.name, "ravi_k");
        assert_eq!(user.email, "9876543210@olxuser.in");
        assert_eq!(user.contact.as_deref(), Some("+919876543210"));
        assert_eq!(user.profile_image.as_deref(), Some("data:image/png;base64,AAA"));
    }
}
