use crate::services::backend::{BackendEvent, BackendOutcome, BackendRequest, MockBackend, TaskHandle};
use crate::services::contact::ContactValidator;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotFocus {
    Contact,
    Submit,
    Back,
}

impl ForgotFocus {
    pub fn next(self) -> Self {
        match self {
            ForgotFocus::Contact => ForgotFocus::Submit,
            ForgotFocus::Submit => ForgotFocus::Back,
            ForgotFocus::Back => ForgotFocus::Contact,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ForgotFocus::Contact => ForgotFocus::Back,
            ForgotFocus::Submit => ForgotFocus::Contact,
            ForgotFocus::Back => ForgotFocus::Submit,
        }
    }
}

#[derive(Debug)]
pub enum ForgotPhase {
    Editing,
    Sending(TaskHandle),
    Sent { destination: String },
}

#[derive(Debug)]
pub struct ForgotPasswordFlow {
    pub contact: String,
    pub error: Option<String>,
    pub focus: ForgotFocus,
    phase: ForgotPhase,
    contacts: ContactValidator,
}

impl ForgotPasswordFlow {
    pub fn new(contacts: ContactValidator) -> Self {
        Self {
            contact: String::new(),
            error: None,
            focus: ForgotFocus::Contact,
            phase: ForgotPhase::Editing,
            contacts,
        }
    }

    pub fn phase(&self) -> &ForgotPhase {
        &self.phase
    }

    pub fn contact_hint(&self) -> String {
        self.contacts.hint()
    }

    pub fn input_char(&mut self, c: char) {
        if matches!(self.phase, ForgotPhase::Editing) {
            self.contact.push(c);
            self.error = None;
        }
    }

    pub fn backspace(&mut self) {
        if matches!(self.phase, ForgotPhase::Editing) {
            self.contact.pop();
            self.error = None;
        }
    }

    pub fn submit(&mut self, backend: &mut MockBackend) -> bool {
        if !matches!(self.phase, ForgotPhase::Editing) {
            return false;
        }
        match self.contacts.parse(&self.contact) {
            Ok(contact) => {
                let destination = contact.destination();
                info!("Requesting password reset for {}", destination);
                self.phase = ForgotPhase::Sending(backend.spawn(BackendRequest::SendPasswordReset { destination }));
                true
            }
            Err(e) => {
                debug!("Reset contact rejected: {}", e);
                self.error = Some(self.contacts.summary_message());
                false
            }
        }
    }

    /// Returns the destination once the reset notice has gone out.
    pub fn handle_event(&mut self, event: &BackendEvent) -> Option<String> {
        let ForgotPhase::Sending(task) = &self.phase else {
            return None;
        };
        if task.id() != event.task {
            return None;
        }
        let BackendOutcome::PasswordResetSent { destination } = &event.outcome else {
            return None;
        };
        self.phase = ForgotPhase::Sent {
            destination: destination.clone(),
        };
        Some(destination.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Delays;
    use crate::services::contact::EmailPolicy;
    use crate::services::username::UsernameRegistry;
    use tokio::sync::mpsc;

    fn setup() -> (ForgotPasswordFlow, MockBackend, mpsc::UnboundedReceiver<BackendEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = MockBackend::new(tx, Delays::default(), UsernameRegistry::default());
        let flow = ForgotPasswordFlow::new(ContactValidator::new(EmailPolicy::Domain("gmail.com".to_string())));
        (flow, backend, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn reset_is_sent_to_phone_destination() {
        let (mut flow, mut backend, mut rx) = setup();
        flow.contact = "9876543210".to_string();
        assert!(flow.submit(&mut backend));
        assert!(matches!(flow.phase(), ForgotPhase::Sending(_)));

        let event = rx.recv().await.unwrap();
        assert_eq!(flow.handle_event(&event).as_deref(), Some("+919876543210"));
        assert!(matches!(flow.phase(), ForgotPhase::Sent { destination } if destination == "+919876543210"));
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_domain_uses_login_message() {
        let (mut flow, mut backend, _rx) = setup();
        flow.contact = "someone@yahoo.com".to_string();
        assert!(!flow.submit(&mut backend));
        assert_eq!(
            flow.error.as_deref(),
            Some("Enter a valid 10-digit phone number or @gmail.com email address")
        );

        flow.input_char('x');
        assert_eq!(flow.error, None);
    }

    #[test]
    fn focus_cycles() {
        assert_eq!(ForgotFocus::Back.next(), ForgotFocus::Contact);
        assert_eq!(ForgotFocus::Contact.prev(), ForgotFocus::Back);
    }
}
