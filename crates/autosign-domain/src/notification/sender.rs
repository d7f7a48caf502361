use async_trait::async_trait;

use super::NotificationMessage;
use crate::shared::DomainError;

/// What happened to a notification handed to a sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Channel is disabled; nothing was sent
    Skipped,
    /// The channel accepted the request and answered with `status`
    Sent { target: String, status: u16 },
}

/// Notification sender trait (Strategy pattern)
/// Each notification channel type implements this trait
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a notification message
    async fn send(&self, message: &NotificationMessage) -> Result<Delivery, DomainError>;

    /// Whether `send` may perform an outbound call at all
    fn is_enabled(&self) -> bool {
        true
    }
}
