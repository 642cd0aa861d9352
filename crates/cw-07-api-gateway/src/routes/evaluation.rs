//! `/evaluation-configs` endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use cw_02_evaluation_catalog::OptionInput;
use serde::Deserialize;
use shared_types::{ConfigId, Criterion, Perspective};

use super::{parse_opt, parse_required};
use crate::auth::Caller;
use crate::envelope::{created, ok};
use crate::error::ApiResult;
use crate::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListConfigsQuery {
    pub perspective: Option<String>,
    pub criterion: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateConfigBody {
    pub perspective: String,
    pub criterion: String,
    pub options: Vec<OptionInput>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceOptionsBody {
    pub options: Vec<OptionInput>,
}

pub async fn list_configs(
    State(state): State<AppState>,
    Caller(_): Caller,
    query: Result<Query<ListConfigsQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(query) = query?;
    let perspective: Option<Perspective> = parse_opt(query.perspective.as_deref(), "perspective")?;
    let criterion: Option<Criterion> = parse_opt(query.criterion.as_deref(), "criterion")?;
    let configs = state.catalog.list_configs(perspective, criterion)?;
    Ok(ok(configs))
}

pub async fn create_config(
    State(state): State<AppState>,
    Caller(_): Caller,
    body: Result<Json<CreateConfigBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let perspective: Perspective = parse_required(Some(&body.perspective), "perspective")?;
    let criterion: Criterion = parse_required(Some(&body.criterion), "criterion")?;
    let config = state
        .catalog
        .create_config(perspective, criterion, body.options)?;
    Ok(created(config))
}

pub async fn replace_options(
    State(state): State<AppState>,
    Caller(_): Caller,
    Path(id): Path<String>,
    body: Result<Json<ReplaceOptionsBody>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let id: ConfigId = parse_required(Some(&id), "config id")?;
    let Json(body) = body?;
    let config = state.catalog.replace_options(id, body.options)?;
    Ok(ok(config))
}

pub async fn deactivate_config(
    State(state): State<AppState>,
    Caller(_): Caller,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id: ConfigId = parse_required(Some(&id), "config id")?;
    let config = state.catalog.deactivate_by_id(id)?;
    Ok(ok(config))
}
