//! Ports layer for the Notification Inbox

pub mod inbound;
pub mod outbound;

pub use inbound::NotificationInbox;
pub use outbound::NotificationStore;
