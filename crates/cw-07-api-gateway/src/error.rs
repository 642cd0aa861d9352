//! Gateway errors and their HTTP rendering.
//!
//! Every failure leaves the gateway as `{success: false, error}` with a
//! status derived from the subsystem's `ErrorKind`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cw_01_case_lifecycle::LifecycleError;
use cw_02_evaluation_catalog::CatalogError;
use cw_03_notification_inbox::InboxError;
use shared_types::{ErrorKind, ParseError};
use thiserror::Error;
use tracing::error;

use crate::envelope::Envelope;

/// Startup and serving errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid gateway configuration: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Map a classified subsystem error. Fatal details stay in the log.
    fn classified(kind: ErrorKind, message: String) -> Self {
        match kind {
            ErrorKind::Validation => Self::new(StatusCode::BAD_REQUEST, message),
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, message),
            ErrorKind::Conflict => Self::new(StatusCode::CONFLICT, message),
            ErrorKind::Fatal => {
                error!(error = %message, "Request failed on primary storage");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        Self::classified(err.kind(), err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self::classified(err.kind(), err.to_string())
    }
}

impl From<InboxError> for ApiError {
    fn from(err: InboxError) -> Self {
        Self::classified(err.kind(), err.to_string())
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::<()>::failure(self.message))).into_response()
    }
}

/// Result type for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CaseId, CaseKind, CaseStatus, ConfigId};

    #[test]
    fn test_lifecycle_errors_map_to_status() {
        let validation: ApiError = LifecycleError::MissingField("title").into();
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);

        let missing: ApiError = LifecycleError::NotFound {
            kind: CaseKind::Delivery,
            id: CaseId::new(),
        }
        .into();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let conflict: ApiError = LifecycleError::InvalidTransition {
            from: CaseStatus::Completed,
            to: CaseStatus::InProgress,
        }
        .into();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_fatal_message_is_generic() {
        let fatal: ApiError = CatalogError::Storage("connection reset".into()).into();
        assert_eq!(fatal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!fatal.message.contains("connection reset"));
    }

    #[test]
    fn test_catalog_not_found() {
        let err: ApiError = CatalogError::ConfigNotFound(ConfigId::new()).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
