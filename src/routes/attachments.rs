use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{Attachment, EquipmentItem, NewAttachment};
use crate::error::{ApiError, ApiResult};
use crate::store::{ChildKind, StoreError};

pub async fn add_attachment(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewAttachment>,
) -> ApiResult<Created<Attachment>> {
    let attachment = state.projects.write().add_attachment(project_id, req)?;
    tracing::info!(
        project_id = %project_id,
        attachment_id = %attachment.id,
        kind = ?attachment.kind,
        "Attachment added"
    );
    Ok(Created(attachment))
}

pub async fn delete_attachment(
    State(state): State<Arc<AppState>>,
    Path((project_id, attachment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .projects
        .write()
        .delete_attachment(project_id, attachment_id)?;
    Ok(NoContent)
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Copy the extracted equipment into the project and rebuild its bill of
    /// materials (default true)
    pub import: Option<bool>,
}

/// Run plan-set analysis on an attachment
pub async fn analyze_attachment(
    State(state): State<Arc<AppState>>,
    Path((project_id, attachment_id)): Path<(Uuid, Uuid)>,
    Query(params): Query<AnalyzeParams>,
) -> ApiResult<DataResponse<Attachment>> {
    let import = params.import.unwrap_or(true);
    let attachment = analyze_and_import(&state, project_id, attachment_id, import).await?;
    Ok(DataResponse::new(attachment))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAnalyzedRequest {
    #[serde(default)]
    pub extracted_equipment: Option<Vec<EquipmentItem>>,
}

/// Record an analysis result produced elsewhere
pub async fn mark_analyzed(
    State(state): State<Arc<AppState>>,
    Path((project_id, attachment_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<MarkAnalyzedRequest>,
) -> ApiResult<DataResponse<Attachment>> {
    let attachment = state.projects.write().mark_attachment_analyzed(
        project_id,
        attachment_id,
        req.extracted_equipment,
    )?;
    Ok(DataResponse::new(attachment))
}

/// Analyze an attachment's plan set and record the result.
///
/// The store is read and written under separate short locks so no lock is
/// held while the analyzer runs. With `import`, the extracted items become
/// part of the project's equipment and the bill of materials is regenerated.
pub(crate) async fn analyze_and_import(
    state: &AppState,
    project_id: Uuid,
    attachment_id: Uuid,
    import: bool,
) -> ApiResult<Attachment> {
    let url = {
        let store = state.projects.read();
        let project = store
            .get(project_id)
            .ok_or(StoreError::ProjectNotFound(project_id))?;
        project
            .attachments
            .iter()
            .find(|a| a.id == attachment_id)
            .map(|a| a.url.clone())
            .ok_or(StoreError::ChildNotFound {
                kind: ChildKind::Attachment,
                id: attachment_id,
            })?
    };

    let extracted = state.analyzer.analyze(&url).await.map_err(|e| {
        ApiError::Internal(anyhow::Error::new(e).context("Plan set analysis failed"))
    })?;

    let attachment = state
        .projects
        .write()
        .record_analysis(project_id, attachment_id, extracted, import)?;

    tracing::info!(
        project_id = %project_id,
        attachment_id = %attachment_id,
        items = attachment.extracted_equipment.as_ref().map_or(0, Vec::len),
        import,
        "Plan set analyzed"
    );
    Ok(attachment)
}
