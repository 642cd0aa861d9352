//! Driving Ports (API - Inbound)

use shared_types::{ConfigId, Criterion, Perspective};

use crate::domain::{EvaluationConfig, EvaluationOption, OptionInput};
use crate::error::CatalogResult;

/// Evaluation catalog API.
pub trait EvaluationCatalogApi: Send + Sync {
    /// Active options in order. Empty when the pair has no config.
    fn get_options(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Vec<EvaluationOption>>;

    /// Create the pair's config, or replace all of its options.
    fn upsert_options(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig>;

    /// Soft-disable the pair's active config.
    fn deactivate(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<EvaluationConfig>;

    /// Create a config; fails with `DuplicateConfig` if the pair has one.
    fn create_config(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig>;

    fn list_configs(
        &self,
        perspective: Option<Perspective>,
        criterion: Option<Criterion>,
    ) -> CatalogResult<Vec<EvaluationConfig>>;

    fn get_config(&self, id: ConfigId) -> CatalogResult<EvaluationConfig>;

    fn replace_options(
        &self,
        id: ConfigId,
        options: Vec<OptionInput>,
    ) -> CatalogResult<EvaluationConfig>;

    fn deactivate_by_id(&self, id: ConfigId) -> CatalogResult<EvaluationConfig>;

    /// Min/max points of the active options.
    fn score_range(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> CatalogResult<Option<(u32, u32)>>;
}
