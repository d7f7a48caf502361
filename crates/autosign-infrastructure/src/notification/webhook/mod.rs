mod message_builder;
mod sender;

use crate::http::HttpClient;

/// Posts notifications as Discord-style embeds to a webhook URL
pub struct WebhookSender {
    webhook_url: String,
    http: HttpClient,
}

impl WebhookSender {
    pub fn new(webhook_url: String, http: HttpClient) -> Self {
        Self { webhook_url, http }
    }
}
