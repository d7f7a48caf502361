use serde::{Deserialize, Serialize};

use crate::check_in::SignOutcome;

/// A titled field rendered inside a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Notification message to be sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title
    pub title: String,
    /// Optional free-form body
    pub description: Option<String>,
    /// Structured fields, in display order
    pub fields: Vec<NotificationField>,
}

impl NotificationMessage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(NotificationField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Build the message reporting one account's sign-in outcome
    pub fn for_outcome(username: &str, outcome: &SignOutcome) -> Self {
        match outcome {
            SignOutcome::Success {
                message,
                signed_flow,
                total_flow,
            } => Self::new(format!(
                "[{}] HayFrp Auto Sign Finished! (+{} GB)",
                username, signed_flow
            ))
            .with_field("SignFlow", format!("{} GB", signed_flow), true)
            .with_field("TotalFlow", format!("{} GB", total_flow), true)
            .with_field("Message", message.clone(), false),
            SignOutcome::Failure { message } => {
                Self::new(format!("[{}] HayFrp Auto Sign Failed!", username))
                    .with_description(message.clone())
            }
            SignOutcome::AlreadySigned => {
                Self::new(format!("[{}] (HayFrp) Already signed!", username))
            }
        }
    }
}
