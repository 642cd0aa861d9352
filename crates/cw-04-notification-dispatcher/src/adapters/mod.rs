//! Adapters for the Notification Dispatcher

pub mod channel;

pub use channel::{DisabledChannel, RecordingChannel};
