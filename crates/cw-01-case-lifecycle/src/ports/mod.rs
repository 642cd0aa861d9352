//! Ports module for the Case Lifecycle subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::CaseLifecycleApi;
pub use outbound::{CaseRepository, ScoreRangeSource};
