//! Adapters for the Notification Inbox

pub mod memory;

pub use memory::InMemoryNotificationStore;
