//! Notification processors - transition actions

mod dispatch_email;

pub use dispatch_email::DispatchEmailProcessor;
