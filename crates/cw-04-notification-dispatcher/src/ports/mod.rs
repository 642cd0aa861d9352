//! Ports layer for the Notification Dispatcher

pub mod inbound;
pub mod outbound;

pub use inbound::NotificationDispatch;
pub use outbound::ExternalChannel;
