//! Evaluation configs and their option vocabularies.

use serde::{Deserialize, Serialize};
use shared_types::{default_scale, ConfigId, Criterion, Perspective, Timestamp};
use std::collections::HashSet;

use crate::error::{CatalogError, CatalogResult};

/// One scored choice in a vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationOption {
    pub label: String,
    pub points: u32,
    pub order: u32,
    pub is_active: bool,
}

/// Client-supplied option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInput {
    pub label: String,
    pub points: u32,
    pub order: u32,
}

impl OptionInput {
    pub fn new(label: impl Into<String>, points: u32, order: u32) -> Self {
        Self {
            label: label.into(),
            points,
            order,
        }
    }
}

/// The vocabulary for one (perspective, criterion) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationConfig {
    pub id: ConfigId,
    pub perspective: Perspective,
    pub criterion: Criterion,
    pub is_active: bool,
    /// Sorted by `order`.
    pub options: Vec<EvaluationOption>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EvaluationConfig {
    pub fn new(
        perspective: Perspective,
        criterion: Criterion,
        options: Vec<EvaluationOption>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: ConfigId::new(),
            perspective,
            criterion,
            is_active: true,
            options,
            created_at: now,
            updated_at: now,
        }
    }

    /// Active options in display order.
    pub fn active_options(&self) -> Vec<EvaluationOption> {
        if !self.is_active {
            return Vec::new();
        }
        self.options.iter().filter(|o| o.is_active).cloned().collect()
    }

    /// Soft-disable the config and every option under it.
    pub fn deactivate(&mut self, now: Timestamp) {
        self.is_active = false;
        for option in &mut self.options {
            option.is_active = false;
        }
        self.updated_at = now;
    }
}

/// Min and max points of an option list.
pub fn points_range(options: &[EvaluationOption]) -> Option<(u32, u32)> {
    let min = options.iter().map(|o| o.points).min()?;
    let max = options.iter().map(|o| o.points).max()?;
    Some((min, max))
}

/// Check a replacement option list and turn it into stored options,
/// sorted by `order`.
pub fn validate_options(
    perspective: Perspective,
    criterion: Criterion,
    inputs: Vec<OptionInput>,
) -> CatalogResult<Vec<EvaluationOption>> {
    if !perspective.criteria().contains(&criterion) {
        return Err(CatalogError::CriterionNotAllowed {
            perspective,
            criterion,
        });
    }
    if inputs.is_empty() {
        return Err(CatalogError::EmptyOptions);
    }

    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        let label = input.label.trim();
        if label.is_empty() {
            return Err(CatalogError::BlankLabel { index });
        }
        if input.points == 0 {
            return Err(CatalogError::InvalidPoints {
                index,
                points: input.points,
            });
        }
        if !seen.insert(input.order) {
            return Err(CatalogError::DuplicateOrder(input.order));
        }
        options.push(EvaluationOption {
            label: label.to_string(),
            points: input.points,
            order: input.order,
            is_active: true,
        });
    }

    options.sort_by_key(|o| o.order);
    Ok(options)
}

/// Reference vocabulary for a pair, one option per point.
pub fn default_options(perspective: Perspective, criterion: Criterion) -> Option<Vec<OptionInput>> {
    let (min, max) = default_scale(perspective, criterion)?;
    Some(
        (min..=max)
            .enumerate()
            .map(|(order, points)| {
                OptionInput::new(format!("Level {points}"), points, order as u32)
            })
            .collect(),
    )
}
