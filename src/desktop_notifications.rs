#[cfg(feature = "desktop-notifications")]
use notify_rust::{Notification, Timeout};
use tracing::debug;
#[cfg(feature = "desktop-notifications")]
use tracing::error;

#[cfg(feature = "desktop-notifications")]
const APP_NAME: &str = "SEL Marketplace";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationUrgency {
    Low,
    Normal,
}

/// System-level notifications mirroring the in-app demo notices.
#[derive(Debug, Clone, Copy)]
pub struct DesktopNotificationService {
    enabled: bool,
}

impl DesktopNotificationService {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Shows a notification without blocking the caller. Must run inside a tokio runtime.
    pub fn show_notification(&self, title: &str, message: &str, urgency: NotificationUrgency) {
        if !self.enabled {
            debug!("Desktop notifications disabled, skipping: {}", title);
            return;
        }
        Self::dispatch(title.to_string(), message.to_string(), urgency);
    }

    pub fn show_otp_notification(&self, destination: &str, code: &str) {
        let message = format!("Your OTP for {} is {}", destination, code);
        self.show_notification("Verification code", &message, NotificationUrgency::Normal);
    }

    pub fn show_password_reset_notification(&self, destination: &str) {
        let message = format!("Password reset instructions sent to {}", destination);
        self.show_notification("Password reset", &message, NotificationUrgency::Low);
    }

    #[cfg(feature = "desktop-notifications")]
    fn dispatch(title: String, message: String, urgency: NotificationUrgency) {
        tokio::spawn(async move {
            if let Err(e) = Self::send_notification(&title, &message, urgency) {
                error!("Failed to send desktop notification: {}", e);
            }
        });
    }

    #[cfg(not(feature = "desktop-notifications"))]
    fn dispatch(title: String, _message: String, _urgency: NotificationUrgency) {
        debug!("Built without desktop notification support, dropping: {}", title);
    }

    #[cfg(feature = "desktop-notifications")]
    fn send_notification(
        title: &str,
        message: &str,
        urgency: NotificationUrgency,
    ) -> Result<(), notify_rust::error::Error> {
        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(message)
            .appname(APP_NAME)
            .icon("dialog-information")
            .timeout(match urgency {
                NotificationUrgency::Low => Timeout::Milliseconds(3000),
                NotificationUrgency::Normal => Timeout::Milliseconds(5000),
            });

        #[cfg(target_os = "linux")]
        {
            use notify_rust::Urgency;
            notification.urgency(match urgency {
                NotificationUrgency::Low => Urgency::Low,
                NotificationUrgency::Normal => Urgency::Normal,
            });
        }

        notification.show()?;
        debug!("Desktop notification sent: {} - {}", title, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_service_sends_nothing() {
        let service = DesktopNotificationService::new(false);
        assert!(!service.enabled);
        service.show_otp_notification("+919876543210", "123456");
    }
}
