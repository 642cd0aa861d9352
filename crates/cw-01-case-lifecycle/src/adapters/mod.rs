//! Adapters for the Case Lifecycle subsystem

pub mod memory;
pub mod score_range;

pub use memory::InMemoryCaseRepository;
pub use score_range::BuiltinScoreRanges;
