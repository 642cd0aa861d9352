//! Error types for the Evaluation Catalog subsystem

use shared_types::{ConfigId, Criterion, ErrorKind, Perspective};
use thiserror::Error;

/// Evaluation catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An option list must hold at least one option.
    #[error("Option list is empty")]
    EmptyOptions,

    #[error("Option {index} has an empty label")]
    BlankLabel { index: usize },

    /// Points must be positive integers.
    #[error("Option {index} has invalid points {points}")]
    InvalidPoints { index: usize, points: u32 },

    #[error("Option order {0} is used more than once")]
    DuplicateOrder(u32),

    #[error("{perspective} does not score {criterion}")]
    CriterionNotAllowed {
        perspective: Perspective,
        criterion: Criterion,
    },

    #[error("Evaluation config not found: {0}")]
    ConfigNotFound(ConfigId),

    #[error("No active evaluation config for {perspective}/{criterion}")]
    NoActiveConfig {
        perspective: Perspective,
        criterion: Criterion,
    },

    /// Only one active config per (perspective, criterion).
    #[error("An active evaluation config already exists for {perspective}/{criterion}")]
    DuplicateConfig {
        perspective: Perspective,
        criterion: Criterion,
    },

    #[error("Evaluation config {0} is inactive")]
    ConfigInactive(ConfigId),

    #[error("Catalog storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// Caller-facing classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyOptions
            | Self::BlankLabel { .. }
            | Self::InvalidPoints { .. }
            | Self::DuplicateOrder(_)
            | Self::CriterionNotAllowed { .. } => ErrorKind::Validation,
            Self::ConfigNotFound(_) | Self::NoActiveConfig { .. } => ErrorKind::NotFound,
            Self::DuplicateConfig { .. } | Self::ConfigInactive(_) => ErrorKind::Conflict,
            Self::Storage(_) => ErrorKind::Fatal,
        }
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
