//! Plan set images and documents filed against solar projects

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{
    DocumentPatch, NewDocument, NewPlanSetImage, PlanSetImage, PlanSetImagePatch, ProjectDocument,
};
use crate::error::ApiResult;

// ============================================================================
// Plan set images
// ============================================================================

pub async fn add_plan_set_image(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewPlanSetImage>,
) -> ApiResult<Created<PlanSetImage>> {
    let image = state.solar.write().add_plan_set_image(project_id, req)?;
    Ok(Created(image))
}

pub async fn update_plan_set_image(
    State(state): State<Arc<AppState>>,
    Path((project_id, image_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<PlanSetImagePatch>,
) -> ApiResult<DataResponse<PlanSetImage>> {
    let image = state
        .solar
        .write()
        .update_plan_set_image(project_id, image_id, patch)?;
    Ok(DataResponse::new(image))
}

pub async fn delete_plan_set_image(
    State(state): State<Arc<AppState>>,
    Path((project_id, image_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .solar
        .write()
        .delete_plan_set_image(project_id, image_id)?;
    Ok(NoContent)
}

// ============================================================================
// Documents
// ============================================================================

pub async fn add_document(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewDocument>,
) -> ApiResult<Created<ProjectDocument>> {
    let document = state.solar.write().add_document(project_id, req)?;
    Ok(Created(document))
}

pub async fn update_document(
    State(state): State<Arc<AppState>>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<DocumentPatch>,
) -> ApiResult<DataResponse<ProjectDocument>> {
    let document = state
        .solar
        .write()
        .update_document(project_id, document_id, patch)?;
    Ok(DataResponse::new(document))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path((project_id, document_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .solar
        .write()
        .delete_document(project_id, document_id)?;
    Ok(NoContent)
}
