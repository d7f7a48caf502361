use autosign_domain::notification::NotificationMessage;
use serde_json::{json, Map, Value};

impl super::WebhookSender {
    /// Build the `{"embeds": [...]}` payload for a message
    pub(super) fn build_embed_payload(&self, message: &NotificationMessage) -> Value {
        let mut embed = Map::new();
        embed.insert("title".to_string(), json!(message.title));

        if let Some(description) = &message.description {
            embed.insert("description".to_string(), json!(description));
        }

        if !message.fields.is_empty() {
            let fields: Vec<Value> = message
                .fields
                .iter()
                .map(|f| {
                    json!({
                        "name": f.name,
                        "value": f.value,
                        "inline": f.inline
                    })
                })
                .collect();
            embed.insert("fields".to_string(), Value::Array(fields));
        }

        json!({ "embeds": [Value::Object(embed)] })
    }
}

#[cfg(test)]
mod tests {
    use crate::http::HttpClient;
    use crate::notification::WebhookSender;
    use autosign_domain::notification::NotificationMessage;
    use autosign_domain::SignOutcome;

    fn sender() -> WebhookSender {
        WebhookSender::new("https://discord.test/hook".to_string(), HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_success_embed() {
        let message = NotificationMessage::for_outcome(
            "alice",
            &SignOutcome::Success {
                message: "ok".to_string(),
                signed_flow: 5.0,
                total_flow: 105.0,
            },
        );

        let payload = sender().build_embed_payload(&message);
        let embed = &payload["embeds"][0];

        assert_eq!(embed["title"], "[alice] HayFrp Auto Sign Finished! (+5 GB)");
        assert!(embed.get("description").is_none());
        assert_eq!(embed["fields"][0]["name"], "SignFlow");
        assert_eq!(embed["fields"][0]["value"], "5 GB");
        assert_eq!(embed["fields"][0]["inline"], true);
        assert_eq!(embed["fields"][2]["inline"], false);
    }

    #[tokio::test]
    async fn test_failure_embed_has_description_only() {
        let message =
            NotificationMessage::for_outcome("bob", &SignOutcome::failure("Token Expired (404)"));

        let payload = sender().build_embed_payload(&message);
        let embed = &payload["embeds"][0];

        assert_eq!(embed["description"], "Token Expired (404)");
        assert!(embed.get("fields").is_none());
    }
}
