//! Dual-perspective assessment scores.
//!
//! Scores are stored as raw integers: a later change to the catalog's
//! vocabulary does not rewrite scores already recorded on cases.

use serde::{Deserialize, Serialize};
use shared_types::{default_scale, Criterion, Perspective, Timestamp};

use crate::error::{LifecycleError, LifecycleResult};

/// The four core criteria plus the optional FORM criterion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentScores {
    pub difficulty: i64,
    pub time: i64,
    pub impact: i64,
    pub urgency: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<i64>,
}

impl AssessmentScores {
    /// Every criterion that carries a value.
    #[must_use]
    pub fn entries(&self) -> Vec<(Criterion, i64)> {
        let mut entries = vec![
            (Criterion::Difficulty, self.difficulty),
            (Criterion::Time, self.time),
            (Criterion::Impact, self.impact),
            (Criterion::Urgency, self.urgency),
        ];
        if let Some(form) = self.form {
            entries.push((Criterion::Form, form));
        }
        entries
    }
}

/// One perspective's assessment block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub scores: AssessmentScores,
    pub assessed_at: Timestamp,
}

/// Inclusive point range of an active vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreRange {
    pub min: u32,
    pub max: u32,
}

impl ScoreRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Built-in range used when the catalog has no config for the pair.
    #[must_use]
    pub fn builtin(perspective: Perspective, criterion: Criterion) -> Option<Self> {
        default_scale(perspective, criterion).map(|(min, max)| Self::new(min, max))
    }

    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }
}

/// Validate every score against the range `lookup` yields for it.
///
/// `lookup` returns the active catalog range, or `None` when the catalog has
/// nothing for that pair; the built-in scale then applies.
pub fn validate_scores<F>(
    perspective: Perspective,
    scores: &AssessmentScores,
    mut lookup: F,
) -> LifecycleResult<()>
where
    F: FnMut(Criterion) -> LifecycleResult<Option<ScoreRange>>,
{
    for (criterion, value) in scores.entries() {
        if !perspective.criteria().contains(&criterion) {
            return Err(LifecycleError::CriterionNotAllowed {
                perspective,
                criterion,
            });
        }

        let range = match lookup(criterion)? {
            Some(range) => range,
            None => ScoreRange::builtin(perspective, criterion).ok_or(
                LifecycleError::CriterionNotAllowed {
                    perspective,
                    criterion,
                },
            )?,
        };

        if value < 1 || !range.contains(value) {
            return Err(LifecycleError::ScoreOutOfRange {
                perspective,
                criterion,
                value,
                min: range.min,
                max: range.max,
            });
        }
    }
    Ok(())
}
