mod message;
mod sender;

pub use message::{NotificationField, NotificationMessage};
pub use sender::{Delivery, NotificationSender};
