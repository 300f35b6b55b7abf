use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::attachments::analyze_and_import;
use super::SelectProjectRequest;
use crate::api::{Created, DataResponse, NoContent, Paginated, PaginationParams};
use crate::app::AppState;
use crate::domain::ai::{ProjectInput, ResearchResult};
use crate::domain::{
    AttachmentType, NewAttachment, NewProject, PlanPatch, Project, ProjectPatch, ProjectPlan,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::RequestIdExt;
use crate::services;
use crate::store::StoreError;

/// List projects in creation order
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Paginated<Project> {
    tracing::debug!(
        page = pagination.page(),
        per_page = pagination.per_page(),
        "Listing projects"
    );

    let page = Paginated::from_slice(state.projects.read().list(), &pagination);
    page
}

/// Create a project without a plan
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProject>,
) -> ApiResult<Created<Project>> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let project = state.projects.write().add_project(req);
    tracing::info!(project_id = %project.id, title = %project.title, "Project created");

    Ok(Created(project))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<Project>> {
    let project = state
        .projects
        .read()
        .get(project_id)
        .cloned()
        .ok_or(StoreError::ProjectNotFound(project_id))?;

    Ok(DataResponse::new(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> ApiResult<DataResponse<Project>> {
    let project = state.projects.write().update_project(project_id, patch)?;
    Ok(DataResponse::new(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    state.projects.write().delete_project(project_id)?;
    tracing::info!(project_id = %project_id, "Project deleted");
    Ok(NoContent)
}

// ============================================================================
// Current project
// ============================================================================

/// The selected project, or `null` when nothing is selected
pub async fn get_current_project(
    State(state): State<Arc<AppState>>,
) -> DataResponse<Option<Project>> {
    let selected = state.projects.read().selected_project().cloned();
    DataResponse::new(selected)
}

/// Select a project; an unknown id clears the selection.
pub async fn select_current_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectProjectRequest>,
) -> DataResponse<Option<Project>> {
    let selected = state
        .projects
        .write()
        .select_project(req.project_id)
        .cloned();

    if selected.is_none() {
        tracing::debug!(project_id = %req.project_id, "Selection cleared - no such project");
    }
    DataResponse::new(selected)
}

// ============================================================================
// Plans
// ============================================================================

pub async fn set_plan(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(plan): Json<ProjectPlan>,
) -> ApiResult<DataResponse<ProjectPlan>> {
    let plan = state.projects.write().set_plan(project_id, plan)?;
    Ok(DataResponse::new(plan))
}

pub async fn update_plan(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(patch): Json<PlanPatch>,
) -> ApiResult<DataResponse<ProjectPlan>> {
    let plan = state.projects.write().update_plan(project_id, patch)?;
    Ok(DataResponse::new(plan))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedProject {
    pub project: Project,
    pub research: ResearchResult,
    /// Set when the plan is the illustrative default rather than a generated one
    pub plan_fallback: bool,
}

/// Research, generate a plan, and create the project that carries it.
///
/// Research finishes before plan generation starts. Plan-set files are then
/// attached as PDFs and analyzed one by one; an analysis failure leaves that
/// attachment unanalyzed and does not fail the request.
pub async fn create_planned_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(input): Json<ProjectInput>,
) -> ApiResult<Created<PlannedProject>> {
    input.validate().map_err(ApiError::BadRequest)?;
    let request_id = headers.request_id();

    tracing::info!(
        title = %input.title,
        strategy = input.selected_strategy.as_str(),
        plan_sets = input.plan_set_files.len(),
        request_id = ?request_id,
        "Generating project plan"
    );

    let research = services::research_or_placeholder(
        state.research.as_ref(),
        &input.research_query(),
        request_id,
    )
    .await;
    let outcome =
        services::plan_or_placeholder(state.planner.as_ref(), &input, &research, request_id).await;

    let project_id = {
        let mut store = state.projects.write();
        let project = store.add_project(NewProject {
            title: input.title.clone(),
            description: input.description.clone(),
            desired_outcome: input.outcome.clone(),
            strategy: input.selected_strategy,
        });
        store.set_plan(project.id, outcome.plan)?;
        project.id
    };

    for file in input.plan_set_files {
        let file = NewAttachment {
            kind: AttachmentType::Pdf,
            ..file
        };
        let attachment = state.projects.write().add_attachment(project_id, file)?;

        if let Err(e) = analyze_and_import(&state, project_id, attachment.id, true).await {
            tracing::warn!(
                project_id = %project_id,
                attachment_id = %attachment.id,
                error = %e,
                "Plan set analysis failed - attachment left unanalyzed"
            );
        }
    }

    let project = state
        .projects
        .read()
        .get(project_id)
        .cloned()
        .ok_or(StoreError::ProjectNotFound(project_id))?;

    tracing::info!(
        project_id = %project_id,
        research_fallback = research.fallback,
        plan_fallback = outcome.fallback,
        "Planned project created"
    );

    Ok(Created(PlannedProject {
        project,
        research,
        plan_fallback: outcome.fallback,
    }))
}
