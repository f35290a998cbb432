use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::dto::ReorderStackRequest;
use crate::api::AppState;
use crate::domain::{DeckError, NewStack, Stack, StackPatch, StackWithCards};
use crate::services::StackService;

pub async fn list_stacks(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<Vec<StackWithCards>>, DeckError> {
    let pool = state.require_db()?;
    let stacks = StackService::find_all(pool, board_id).await?;
    Ok(Json(stacks))
}

pub async fn list_archived_stacks(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
) -> Result<Json<Vec<StackWithCards>>, DeckError> {
    let pool = state.require_db()?;
    let stacks = StackService::find_all_archived(pool, board_id).await?;
    Ok(Json(stacks))
}

pub async fn create_stack(
    State(state): State<AppState>,
    Json(req): Json<NewStack>,
) -> Result<(StatusCode, Json<Stack>), DeckError> {
    let pool = state.require_db()?;
    let stack = StackService::create_stack(pool, req).await?;
    Ok((StatusCode::CREATED, Json(stack)))
}

pub async fn update_stack(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<StackPatch>,
) -> Result<Json<Stack>, DeckError> {
    let pool = state.require_db()?;
    let stack = StackService::update_stack(pool, id, patch).await?;
    Ok(Json(stack))
}

pub async fn delete_stack(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Stack>, DeckError> {
    let pool = state.require_db()?;
    let stack = StackService::delete_stack(pool, id).await?;
    Ok(Json(stack))
}

pub async fn reorder_stack(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ReorderStackRequest>,
) -> Result<Json<Vec<Stack>>, DeckError> {
    let pool = state.require_db()?;
    let stacks = StackService::reorder_stack(pool, id, req.order).await?;
    Ok(Json(stacks))
}
