//! Driven Ports (SPI - Outbound Dependencies)

use shared_types::{ConfigId, Criterion, Perspective, Timestamp};

use crate::domain::{EvaluationConfig, EvaluationOption};
use crate::error::CatalogResult;

/// Durable storage for evaluation configs.
///
/// Implementations must make `replace_options` atomic per config: a reader
/// sees either the old option list or the new one, never an empty gap.
pub trait CatalogStore: Send + Sync {
    /// The active config for a pair, if any.
    fn find_active(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Option<EvaluationConfig>>;

    fn get(&self, id: ConfigId) -> CatalogResult<Option<EvaluationConfig>>;

    /// Active configs, optionally narrowed to one perspective or criterion.
    fn list_active(
        &self,
        perspective: Option<Perspective>,
        criterion: Option<Criterion>,
    ) -> CatalogResult<Vec<EvaluationConfig>>;

    /// Store a new active config. Fails with `DuplicateConfig` when the pair
    /// already has one.
    fn insert(&self, config: EvaluationConfig) -> CatalogResult<()>;

    /// Delete every option of an active config and store `options` instead.
    fn replace_options(
        &self,
        id: ConfigId,
        options: Vec<EvaluationOption>,
        now: Timestamp,
    ) -> CatalogResult<EvaluationConfig>;

    /// Soft-disable a config and its options.
    fn deactivate(&self, id: ConfigId, now: Timestamp) -> CatalogResult<EvaluationConfig>;
}
