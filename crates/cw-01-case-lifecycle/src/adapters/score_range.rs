//! Score range source with no catalog behind it.

use shared_types::{Criterion, Perspective};

use crate::domain::ScoreRange;
use crate::error::LifecycleResult;
use crate::ports::ScoreRangeSource;

/// Always defers to the built-in scales.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinScoreRanges;

impl ScoreRangeSource for BuiltinScoreRanges {
    fn score_range(
        &self,
        _perspective: Perspective,
        _criterion: Criterion,
    ) -> LifecycleResult<Option<ScoreRange>> {
        Ok(None)
    }
}
