use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{DailyUpdate, DailyUpdatePatch, NewDailyUpdate};
use crate::error::ApiResult;

/// Record a daily update; every task it lists is marked completed.
pub async fn add_daily_update(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewDailyUpdate>,
) -> ApiResult<Created<DailyUpdate>> {
    let update = state.solar.write().add_daily_update(project_id, req)?;
    tracing::info!(
        project_id = %project_id,
        update_id = %update.id,
        completed = update.completed_tasks.len(),
        "Daily update recorded"
    );
    Ok(Created(update))
}

pub async fn update_daily_update(
    State(state): State<Arc<AppState>>,
    Path((project_id, update_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<DailyUpdatePatch>,
) -> ApiResult<DataResponse<DailyUpdate>> {
    let update = state
        .solar
        .write()
        .update_daily_update(project_id, update_id, patch)?;
    Ok(DataResponse::new(update))
}

pub async fn delete_daily_update(
    State(state): State<Arc<AppState>>,
    Path((project_id, update_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .solar
        .write()
        .delete_daily_update(project_id, update_id)?;
    Ok(NoContent)
}
