use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{NewSolarTask, SolarTask, SolarTaskPatch};
use crate::error::ApiResult;

pub async fn add_task(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewSolarTask>,
) -> ApiResult<Created<SolarTask>> {
    let task = state.solar.write().add_task(project_id, req)?;
    Ok(Created(task))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<SolarTaskPatch>,
) -> ApiResult<DataResponse<SolarTask>> {
    let task = state.solar.write().update_task(project_id, task_id, patch)?;
    Ok(DataResponse::new(task))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state.solar.write().delete_task(project_id, task_id)?;
    Ok(NoContent)
}
