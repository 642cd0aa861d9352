//! Caller identity supplied by the upstream auth layer.
//!
//! The gateway does not authenticate. It trusts `x-user-id` and
//! `x-user-role` as set by the proxy in front of it.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use shared_types::{CurrentUser, Role, UserId};
use tracing::debug;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub CurrentUser);

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::unauthorized(format!("Missing {name} header")))
}

/// Read the caller from request headers.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let id: UserId = header(headers, USER_ID_HEADER)?
        .parse()
        .map_err(|_| ApiError::unauthorized(format!("Invalid {USER_ID_HEADER} header")))?;
    let role: Role = header(headers, USER_ROLE_HEADER)?
        .parse()
        .map_err(|_| ApiError::unauthorized(format!("Invalid {USER_ROLE_HEADER} header")))?;
    Ok(CurrentUser { id, role })
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = caller_from_headers(&parts.headers).map_err(|err| {
            debug!(
                path = %parts.uri.path(),
                reason = %err.message,
                "Rejected unauthenticated request"
            );
            err
        })?;
        Ok(Self(user))
    }
}
