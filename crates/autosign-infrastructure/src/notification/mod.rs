mod sender_factory;
mod webhook;

pub use sender_factory::{create_sender, DisabledSender};
pub use webhook::WebhookSender;
