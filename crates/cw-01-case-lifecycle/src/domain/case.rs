//! Case entity and creation input.

use serde::{Deserialize, Serialize};
use shared_types::{CaseId, CaseKind, CaseStatus, PersonId, RefId, Timestamp};

use super::assessment::{Assessment, AssessmentScores};
use crate::error::{LifecycleError, LifecycleResult};

/// Kind-specific references. One variant per kind; the variant must match
/// the case's kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CaseDetails {
    Internal,
    Deployment {
        #[serde(rename = "deploymentTypeId")]
        deployment_type_id: RefId,
    },
    Maintenance {
        #[serde(rename = "maintenanceTypeId")]
        maintenance_type_id: RefId,
    },
    Warranty {
        #[serde(rename = "warrantyTypeId")]
        warranty_type_id: RefId,
    },
    Delivery,
    Receiving,
    Incident,
}

/// Flat bag of optional kind references, as submitted by clients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindRefs {
    #[serde(default)]
    pub deployment_type_id: Option<RefId>,
    #[serde(default)]
    pub maintenance_type_id: Option<RefId>,
    #[serde(default)]
    pub warranty_type_id: Option<RefId>,
}

impl CaseDetails {
    /// Build the details for `kind`, requiring that kind's reference.
    pub fn from_refs(kind: CaseKind, refs: &KindRefs) -> LifecycleResult<Self> {
        match kind {
            CaseKind::Internal => Ok(Self::Internal),
            CaseKind::Deployment => refs
                .deployment_type_id
                .map(|deployment_type_id| Self::Deployment { deployment_type_id })
                .ok_or(LifecycleError::MissingField("deploymentTypeId")),
            CaseKind::Maintenance => refs
                .maintenance_type_id
                .map(|maintenance_type_id| Self::Maintenance { maintenance_type_id })
                .ok_or(LifecycleError::MissingField("maintenanceTypeId")),
            CaseKind::Warranty => refs
                .warranty_type_id
                .map(|warranty_type_id| Self::Warranty { warranty_type_id })
                .ok_or(LifecycleError::MissingField("warrantyTypeId")),
            CaseKind::Delivery => Ok(Self::Delivery),
            CaseKind::Receiving => Ok(Self::Receiving),
            CaseKind::Incident => Ok(Self::Incident),
        }
    }

    #[must_use]
    pub fn kind(&self) -> CaseKind {
        match self {
            Self::Internal => CaseKind::Internal,
            Self::Deployment { .. } => CaseKind::Deployment,
            Self::Maintenance { .. } => CaseKind::Maintenance,
            Self::Warranty { .. } => CaseKind::Warranty,
            Self::Delivery => CaseKind::Delivery,
            Self::Receiving => CaseKind::Receiving,
            Self::Incident => CaseKind::Incident,
        }
    }
}

/// A case of any kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub kind: CaseKind,
    pub title: String,
    pub description: String,
    pub requester_id: PersonId,
    pub handler_id: Option<PersonId>,
    pub counterparty_id: Option<RefId>,
    /// Denormalized counterparty name; older cases carry only this.
    pub counterparty_name: Option<String>,
    pub details: CaseDetails,
    pub status: CaseStatus,
    pub start_date: Timestamp,
    /// Set together with COMPLETED, or supplied at creation.
    pub end_date: Option<Timestamp>,
    pub user_assessment: Option<Assessment>,
    pub admin_assessment: Option<Assessment>,
    /// Optimistic concurrency token; bumped on every mutation.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Case {
    /// Kind-specific wording of the current status.
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        self.kind.status_label(self.status)
    }

    /// Stamp a successful mutation.
    pub fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
        self.version += 1;
    }
}

/// Client input for `CreateCase`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub handler_id: Option<PersonId>,
    #[serde(default)]
    pub counterparty_id: Option<RefId>,
    #[serde(default)]
    pub counterparty_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(flatten)]
    pub refs: KindRefs,
    #[serde(default)]
    pub user_assessment: Option<AssessmentScores>,
}

/// `NewCase` after field validation.
#[derive(Clone, Debug)]
pub struct ValidatedNewCase {
    pub title: String,
    pub description: String,
    pub handler_id: PersonId,
    pub counterparty_id: Option<RefId>,
    pub counterparty_name: String,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub details: CaseDetails,
    pub user_assessment: Option<AssessmentScores>,
}

fn required(value: &str, field: &'static str) -> LifecycleResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LifecycleError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

impl NewCase {
    /// Check required fields, kind references and the date range.
    ///
    /// Scores are checked separately against the catalog.
    pub fn validate(&self, kind: CaseKind) -> LifecycleResult<ValidatedNewCase> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let handler_id = self
            .handler_id
            .ok_or(LifecycleError::MissingField("handlerId"))?;
        let counterparty_name = required(
            self.counterparty_name.as_deref().unwrap_or_default(),
            "counterpartyName",
        )?;
        let start_date = self
            .start_date
            .ok_or(LifecycleError::MissingField("startDate"))?;

        if let Some(end_date) = self.end_date {
            if end_date <= start_date {
                return Err(LifecycleError::InvalidDateRange);
            }
        }

        let details = CaseDetails::from_refs(kind, &self.refs)?;

        Ok(ValidatedNewCase {
            title,
            description,
            handler_id,
            counterparty_id: self.counterparty_id,
            counterparty_name,
            start_date,
            end_date: self.end_date,
            details,
            user_assessment: self.user_assessment.clone(),
        })
    }
}
