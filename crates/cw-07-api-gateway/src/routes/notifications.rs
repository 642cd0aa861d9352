//! `/notifications` endpoints. Every operation is scoped to the caller.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use cw_03_notification_inbox::ReadFilter;
use serde::Deserialize;
use shared_types::NotificationId;

use super::{parse_opt, parse_page, parse_required};
use crate::auth::Caller;
use crate::envelope::{ok, Count};
use crate::error::ApiResult;
use crate::router::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    pub is_read: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Caller(user): Caller,
    query: Result<Query<ListNotificationsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let is_read: Option<bool> = parse_opt(query.is_read.as_deref(), "isRead")?;
    let page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let notices = state
        .inbox
        .list_for(user.id, ReadFilter::from_is_read(is_read), page)?;
    Ok(ok(notices))
}

pub async fn unread_count(
    State(state): State<AppState>,
    Caller(user): Caller,
) -> ApiResult<impl IntoResponse> {
    let count = state.inbox.unread_count(user.id)?;
    Ok(ok(Count { count }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: NotificationId = parse_required(Some(&id), "notification id")?;
    let notice = state.inbox.mark_read(user.id, id)?;
    Ok(ok(notice))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    Caller(user): Caller,
) -> ApiResult<impl IntoResponse> {
    let count = state.inbox.mark_all_read(user.id)?;
    Ok(ok(Count { count }))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: NotificationId = parse_required(Some(&id), "notification id")?;
    state.inbox.delete(user.id, id)?;
    Ok(ok(serde_json::json!({ "id": id })))
}
