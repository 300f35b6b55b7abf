use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{NewTask, Task, TaskPatch};
use crate::error::ApiResult;
use crate::store::{ChildKind, StoreError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectTaskRequest {
    pub task_id: Uuid,
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<TaskFilter>,
) -> DataResponse<Vec<Task>> {
    let store = state.tasks.read();
    let tasks: Vec<Task> = match filter.project_id {
        Some(project_id) => store.for_project(project_id).cloned().collect(),
        None => store.list().to_vec(),
    };
    DataResponse::new(tasks)
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewTask>,
) -> ApiResult<Created<Task>> {
    let task = state.tasks.write().add_task(req)?;
    tracing::info!(task_id = %task.id, project_id = %task.project_id, "Task created");
    Ok(Created(task))
}

pub async fn replace_tasks(
    State(state): State<Arc<AppState>>,
    Json(tasks): Json<Vec<Task>>,
) -> ApiResult<DataResponse<Vec<Task>>> {
    let mut store = state.tasks.write();
    store.replace_all(tasks)?;
    Ok(DataResponse::new(store.list().to_vec()))
}

pub async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<DataResponse<Task>> {
    let task = state
        .tasks
        .read()
        .get(task_id)
        .cloned()
        .ok_or(StoreError::ChildNotFound {
            kind: ChildKind::Task,
            id: task_id,
        })?;
    Ok(DataResponse::new(task))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    Json(patch): Json<TaskPatch>,
) -> ApiResult<DataResponse<Task>> {
    let task = state.tasks.write().update_task(task_id, patch)?;
    Ok(DataResponse::new(task))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    state.tasks.write().remove_task(task_id)?;
    Ok(NoContent)
}

pub async fn get_active_task(State(state): State<Arc<AppState>>) -> DataResponse<Option<Task>> {
    let active = state.tasks.read().active_task().cloned();
    DataResponse::new(active)
}

pub async fn set_active_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectTaskRequest>,
) -> DataResponse<Option<Task>> {
    let active = state.tasks.write().set_active_task(req.task_id).cloned();
    DataResponse::new(active)
}
