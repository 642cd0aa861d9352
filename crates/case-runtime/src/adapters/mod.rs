//! # Adapters
//!
//! Port implementations that connect one subsystem to another. Each
//! subsystem only knows its own ports; the runtime provides the glue.

pub mod chat;
pub mod scores;

pub use chat::OutboxChannel;
pub use scores::CatalogScoreRanges;
