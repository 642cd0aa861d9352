//! Lifecycle → catalog adapter for assessment score ranges.

use cw_01_case_lifecycle::{LifecycleError, LifecycleResult, ScoreRange, ScoreRangeSource};
use cw_02_evaluation_catalog::EvaluationCatalogApi;
use shared_types::{Criterion, Perspective};
use std::sync::Arc;

/// Reads the active option range for a pair from the evaluation catalog.
pub struct CatalogScoreRanges {
    catalog: Arc<dyn EvaluationCatalogApi>,
}

impl CatalogScoreRanges {
    pub fn new(catalog: Arc<dyn EvaluationCatalogApi>) -> Self {
        Self { catalog }
    }
}

impl ScoreRangeSource for CatalogScoreRanges {
    fn score_range(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> LifecycleResult<Option<ScoreRange>> {
        self.catalog
            .score_range(perspective, criterion)
            .map(|range| range.map(|(min, max)| ScoreRange::new(min, max)))
            .map_err(|e| LifecycleError::ScoreSource(e.to_string()))
    }
}
