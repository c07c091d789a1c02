mod email_notification;

pub use email_notification::{states, EmailNotification, Priority, SendStatus};
