//! Ports layer for the chat channel

pub mod outbound;

pub use outbound::ChatTransport;
