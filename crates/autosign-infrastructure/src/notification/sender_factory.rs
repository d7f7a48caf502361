use async_trait::async_trait;
use std::sync::Arc;

use autosign_domain::notification::{Delivery, NotificationMessage, NotificationSender};
use autosign_domain::shared::DomainError;

use super::webhook::WebhookSender;
use crate::http::HttpClient;

/// Sender used when no webhook is configured; never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSender;

#[async_trait]
impl NotificationSender for DisabledSender {
    async fn send(&self, _message: &NotificationMessage) -> Result<Delivery, DomainError> {
        Ok(Delivery::Skipped)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Create a notification sender for the configured webhook URL.
///
/// `None`, an empty string and the literal `disabled` all yield a
/// [`DisabledSender`].
pub fn create_sender(webhook_url: Option<&str>, http: HttpClient) -> Arc<dyn NotificationSender> {
    match webhook_url.map(str::trim) {
        Some(url) if !url.is_empty() && url != "disabled" => {
            Arc::new(WebhookSender::new(url.to_string(), http))
        }
        _ => Arc::new(DisabledSender),
    }
}
