use async_trait::async_trait;
use reqwest::{header, Method};

use autosign_domain::notification::{Delivery, NotificationMessage, NotificationSender};
use autosign_domain::shared::DomainError;

#[async_trait]
impl NotificationSender for super::WebhookSender {
    async fn send(&self, message: &NotificationMessage) -> Result<Delivery, DomainError> {
        let url = url::Url::parse(&self.webhook_url).map_err(|e| {
            DomainError::InvalidInput(format!("Invalid webhook URL '{}': {}", self.webhook_url, e))
        })?;
        let payload = self.build_embed_payload(message);

        let request = self
            .http
            .request(Method::POST, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CACHE_CONTROL, "no-cache")
            .json(&payload)
            .build()
            .map_err(|e| DomainError::Infrastructure(format!("Failed to build webhook request: {}", e)))?;

        let response = self.http.execute(request).await.map_err(|e| {
            DomainError::Infrastructure(format!("Failed to send webhook: {}", e))
        })?;

        Ok(Delivery::Sent {
            target: self.webhook_url.clone(),
            status: response.status().as_u16(),
        })
    }
}
