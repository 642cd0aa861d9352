//! Request handlers, one module per resource.

pub mod cases;
pub mod evaluation;
pub mod notifications;
pub mod system;

use shared_types::{Page, DEFAULT_PAGE_LIMIT};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};

/// Parse an optional query value, naming the parameter on failure.
pub(crate) fn parse_opt<T>(raw: Option<&str>, name: &str) -> ApiResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|err| ApiError::bad_request(format!("Invalid {name}: {err}"))),
    }
}

/// Parse a required value.
pub(crate) fn parse_required<T>(raw: Option<&str>, name: &str) -> ApiResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    parse_opt(raw, name)?.ok_or_else(|| ApiError::bad_request(format!("Missing {name}")))
}

/// `page`/`limit` query pair. Defaults 1 and 20; limit is capped.
pub(crate) fn parse_page(page: Option<&str>, limit: Option<&str>) -> ApiResult<Page> {
    let page: u32 = parse_opt(page, "page")?.unwrap_or(1);
    let limit: u32 = parse_opt(limit, "limit")?.unwrap_or(DEFAULT_PAGE_LIMIT);
    Ok(Page::new(page, limit))
}
