//! Domain layer for the chat channel

pub mod message;

pub use message::{escape_html, render, ChatMessage, ParseMode};
