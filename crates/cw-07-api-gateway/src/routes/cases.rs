//! `/cases/{kind}` endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use cw_01_case_lifecycle::{AssessmentScores, NewCase};
use serde::Deserialize;
use shared_types::{CaseId, CaseKind, CaseStatus, Perspective, PersonId};

use super::{parse_opt, parse_page, parse_required};
use crate::auth::Caller;
use crate::envelope::{created, ok};
use crate::error::ApiResult;
use crate::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListCasesQuery {
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssessmentQuery {
    pub perspective: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransitionBody {
    pub status: String,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub handler_id: PersonId,
    pub version: u64,
}

fn case_path(kind: &str, id: &str) -> ApiResult<(CaseKind, CaseId)> {
    Ok((
        parse_required(Some(kind), "case kind")?,
        parse_required(Some(id), "case id")?,
    ))
}

pub async fn create_case(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path(kind): Path<String>,
    body: Result<Json<NewCase>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let kind: CaseKind = parse_required(Some(&kind), "case kind")?;
    let Json(input) = body?;
    let case = state.cases.create_case(user, kind, input).await?;
    Ok(created(case))
}

pub async fn list_cases(
    State(state): State<AppState>,
    Caller(_): Caller,
    Path(kind): Path<String>,
    query: Result<Query<ListCasesQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let kind: CaseKind = parse_required(Some(&kind), "case kind")?;
    let Query(query) = query?;
    let status: Option<CaseStatus> = parse_opt(query.status.as_deref(), "status")?;
    let page = parse_page(query.page.as_deref(), query.limit.as_deref())?;
    let cases = state.cases.list_cases(kind, status, page).await?;
    Ok(ok(cases))
}

pub async fn get_case(
    State(state): State<AppState>,
    Caller(_): Caller,
    Path((kind, id)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let (kind, id) = case_path(&kind, &id)?;
    let case = state.cases.get_case(kind, id).await?;
    Ok(ok(case))
}

pub async fn transition_status(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<TransitionBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let (kind, id) = case_path(&kind, &id)?;
    let Json(body) = body?;
    let target: CaseStatus = parse_required(Some(&body.status), "status")?;
    let case = state
        .cases
        .transition_status(user, kind, id, target, body.version)
        .await?;
    Ok(ok(case))
}

pub async fn record_assessment(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path((kind, id)): Path<(String, String)>,
    query: Result<Query<AssessmentQuery>, QueryRejection>,
    body: Result<Json<AssessmentScores>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let (kind, id) = case_path(&kind, &id)?;
    let Query(query) = query?;
    let perspective: Perspective = parse_required(query.perspective.as_deref(), "perspective")?;
    let Json(scores) = body?;
    let case = state
        .cases
        .record_assessment(user, kind, id, perspective, scores)
        .await?;
    Ok(ok(case))
}

pub async fn assign_handler(
    State(state): State<AppState>,
    Caller(user): Caller,
    Path((kind, id)): Path<(String, String)>,
    body: Result<Json<AssignBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let (kind, id) = case_path(&kind, &id)?;
    let Json(body) = body?;
    let case = state
        .cases
        .assign_handler(user, kind, id, body.handler_id, body.version)
        .await?;
    Ok(ok(case))
}
