//! Chat transports

pub mod recording;
pub mod telegram;

pub use recording::RecordingTransport;
pub use telegram::TelegramTransport;
