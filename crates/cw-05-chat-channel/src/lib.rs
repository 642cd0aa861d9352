//! # cw-05-chat-channel
//!
//! Best-effort delivery of case events to one fixed chat destination.
//!
//! ```text
//! Dispatcher ──enqueue──→ ChatOutbox ══bounded queue══→ OutboxWorker ──→ ChatTransport
//! ```
//!
//! Enqueueing never blocks and never fails the caller's operation. The
//! worker bounds every call with a timeout; send errors, timeouts and
//! dropped messages are logged and counted.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod outbox;
pub mod ports;

pub use adapters::{RecordingTransport, TelegramTransport};
pub use config::ChatConfig;
pub use domain::{render, ChatMessage, ParseMode};
pub use error::{ChannelError, ChannelResult};
pub use outbox::{ChatOutbox, OutboxStats, OutboxWorker};
pub use ports::ChatTransport;
