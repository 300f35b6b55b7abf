use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::SelectProjectRequest;
use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{NewSolarProject, SolarProject, SolarProjectPatch};
use crate::error::ApiResult;
use crate::store::views::{project_progress, ProjectProgress};
use crate::store::StoreError;

pub async fn list_projects(State(state): State<Arc<AppState>>) -> DataResponse<Vec<SolarProject>> {
    let projects = state.solar.read().list().to_vec();
    DataResponse::new(projects)
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSolarProject>,
) -> ApiResult<Created<SolarProject>> {
    let project = state.solar.write().add_project(req)?;
    tracing::info!(project_id = %project.id, kind = ?project.kind, "Solar project created");

    Ok(Created(project))
}

/// Replace the whole collection, e.g. when restoring a saved workspace
pub async fn replace_projects(
    State(state): State<Arc<AppState>>,
    Json(projects): Json<Vec<SolarProject>>,
) -> ApiResult<DataResponse<Vec<SolarProject>>> {
    let mut store = state.solar.write();
    store.replace_all(projects)?;
    Ok(DataResponse::new(store.list().to_vec()))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<SolarProject>> {
    let project = state
        .solar
        .read()
        .get(project_id)
        .cloned()
        .ok_or(StoreError::ProjectNotFound(project_id))?;

    Ok(DataResponse::new(project))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(patch): Json<SolarProjectPatch>,
) -> ApiResult<DataResponse<SolarProject>> {
    let project = state.solar.write().update_project(project_id, patch)?;
    Ok(DataResponse::new(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<NoContent> {
    state.solar.write().delete_project(project_id)?;
    tracing::info!(project_id = %project_id, "Solar project deleted");
    Ok(NoContent)
}

pub async fn get_current_project(
    State(state): State<Arc<AppState>>,
) -> DataResponse<Option<SolarProject>> {
    let current = state.solar.read().current_project().cloned();
    DataResponse::new(current)
}

pub async fn set_current_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectProjectRequest>,
) -> DataResponse<Option<SolarProject>> {
    let current = state
        .solar
        .write()
        .set_current_project(req.project_id)
        .cloned();
    DataResponse::new(current)
}

/// Overall and per-phase completion
pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<ProjectProgress>> {
    let progress = state
        .solar
        .read()
        .get(project_id)
        .map(|project| project_progress(&project.tasks))
        .ok_or(StoreError::ProjectNotFound(project_id))?;

    Ok(DataResponse::new(progress))
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::app::{testing, AppState};
    use crate::routes::test_support::send;
    use axum::http::{Method, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    pub fn new_solar_project() -> Value {
        json!({
            "title": "Residential Solar Installation - Johnson Family",
            "description": "10kW rooftop system",
            "type": "residential",
            "systemSize": 10.0,
            "startDate": "2023-06-01T00:00:00Z",
            "estimatedCompletion": "2023-06-15T00:00:00Z",
            "status": "in-progress",
            "client": {
                "name": "Johnson Family",
                "email": "john.johnson@example.com",
                "phone": "(555) 123-4567",
                "address": {"street": "123 Sunshine Ave", "city": "Solar City", "state": "CA", "zipCode": "94000"}
            }
        })
    }

    pub async fn create(state: &Arc<AppState>) -> String {
        let (status, body) = send(state, Method::POST, "/solar/projects", Some(new_solar_project())).await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_solar_project_crud() {
        let state = testing::state();
        let id = create(&state).await;
        let uri = format!("/solar/projects/{}", id);

        let (_, body) = send(&state, Method::GET, &uri, None).await;
        assert_eq!(body["data"]["type"], "residential");
        assert_eq!(body["data"]["client"]["address"]["zipCode"], "94000");
        assert_eq!(body["data"]["tasks"], json!([]));

        let (status, body) = send(&state, Method::PATCH, &uri, Some(json!({"status": "on-hold"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "on-hold");

        let (status, _) = send(&state, Method::PATCH, &uri, Some(json!({"systemSize": -2.0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&state, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_solar_project_and_replace_all() {
        let state = testing::state();
        let id = create(&state).await;

        let (_, body) = send(&state, Method::PUT, "/solar/current", Some(json!({"projectId": id}))).await;
        assert_eq!(body["data"]["id"], id.as_str());

        let (_, listed) = send(&state, Method::GET, "/solar/projects", None).await;
        let mut saved = listed["data"].clone();
        saved[0]["title"] = json!("Restored");

        let (status, body) = send(&state, Method::PUT, "/solar/projects", Some(saved)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (_, body) = send(&state, Method::GET, "/solar/current", None).await;
        assert_eq!(body["data"]["title"], "Restored");

        send(&state, Method::PUT, "/solar/projects", Some(json!([]))).await;
        let (_, body) = send(&state, Method::GET, "/solar/current", None).await;
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn test_replace_all_rejects_duplicate_ids() {
        let state = testing::state();
        create(&state).await;
        let (_, listed) = send(&state, Method::GET, "/solar/projects", None).await;
        let project = listed["data"][0].clone();

        let (status, body) = send(&state, Method::PUT, "/solar/projects", Some(json!([project, project]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (_, after) = send(&state, Method::GET, "/solar/projects", None).await;
        assert_eq!(after, listed);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title_and_negative_size() {
        let state = testing::state();

        let mut blank = new_solar_project();
        blank["title"] = json!("  ");
        let (status, _) = send(&state, Method::POST, "/solar/projects", Some(blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let mut negative = new_solar_project();
        negative["systemSize"] = json!(-1.0);
        let (status, _) = send(&state, Method::POST, "/solar/projects", Some(negative)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_progress_of_empty_project() {
        let state = testing::state();
        let id = create(&state).await;

        let (status, body) = send(&state, Method::GET, &format!("/solar/projects/{}/progress", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["percentage"], 0);
        assert_eq!(body["data"]["sections"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["sections"][0]["section"], "rail-installation");
    }
}
