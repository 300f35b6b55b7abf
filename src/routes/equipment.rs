use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::{
    BillOfMaterials, BillOfMaterialsPatch, EquipmentItem, EquipmentPatch, NewEquipment, Project,
};
use crate::error::ApiResult;
use crate::services::installation_instructions;
use crate::store::views::{
    bill_of_materials_csv, bill_of_materials_filename, bill_of_materials_summary,
    BillOfMaterialsSummary,
};
use crate::store::{ChildKind, StoreError};

fn read_project<T>(
    state: &AppState,
    project_id: Uuid,
    f: impl FnOnce(&Project) -> Result<T, StoreError>,
) -> ApiResult<T> {
    let store = state.projects.read();
    let project = store
        .get(project_id)
        .ok_or(StoreError::ProjectNotFound(project_id))?;
    Ok(f(project)?)
}

pub async fn add_equipment(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<NewEquipment>,
) -> ApiResult<Created<EquipmentItem>> {
    let item = state.projects.write().add_equipment(project_id, req)?;
    Ok(Created(item))
}

pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    Path((project_id, equipment_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<EquipmentPatch>,
) -> ApiResult<DataResponse<EquipmentItem>> {
    let item = state
        .projects
        .write()
        .update_equipment(project_id, equipment_id, patch)?;
    Ok(DataResponse::new(item))
}

pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    Path((project_id, equipment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<NoContent> {
    state
        .projects
        .write()
        .delete_equipment(project_id, equipment_id)?;
    Ok(NoContent)
}

/// Look up installation instructions and store the link on the item
pub async fn find_installation_instructions(
    State(state): State<Arc<AppState>>,
    Path((project_id, equipment_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<DataResponse<EquipmentItem>> {
    let url = read_project(&state, project_id, |project| {
        project
            .equipment
            .iter()
            .flatten()
            .find(|item| item.id == equipment_id)
            .map(installation_instructions)
            .ok_or(StoreError::ChildNotFound {
                kind: ChildKind::Equipment,
                id: equipment_id,
            })
    })?;

    tracing::debug!(equipment_id = %equipment_id, url = %url, "Installation instructions found");

    let patch = EquipmentPatch {
        installation_url: Some(url),
        ..Default::default()
    };
    let item = state
        .projects
        .write()
        .update_equipment(project_id, equipment_id, patch)?;
    Ok(DataResponse::new(item))
}

// ============================================================================
// Bill of materials
// ============================================================================

/// Snapshot the current equipment list as the bill of materials
pub async fn generate_bill_of_materials(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<BillOfMaterials>> {
    let bom = state
        .projects
        .write()
        .generate_bill_of_materials(project_id)?;
    tracing::info!(project_id = %project_id, items = bom.items.len(), "Bill of materials generated");
    Ok(DataResponse::new(bom))
}

pub async fn update_bill_of_materials(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    Json(patch): Json<BillOfMaterialsPatch>,
) -> ApiResult<DataResponse<BillOfMaterials>> {
    let bom = state
        .projects
        .write()
        .update_bill_of_materials(project_id, patch)?;
    Ok(DataResponse::new(bom))
}

/// The project's equipment list, which the summary and CSV are built from.
fn equipment_items(project: &Project) -> Result<(String, Vec<EquipmentItem>), StoreError> {
    match project.equipment.as_ref() {
        Some(items) if !items.is_empty() => Ok((project.title.clone(), items.clone())),
        _ => Err(StoreError::NoEquipment),
    }
}

pub async fn get_bill_of_materials_summary(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<DataResponse<BillOfMaterialsSummary>> {
    let (_, items) = read_project(&state, project_id, equipment_items)?;
    Ok(DataResponse::new(bill_of_materials_summary(&items)))
}

/// CSV download of the equipment list
pub async fn export_bill_of_materials(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Response> {
    let (title, items) = read_project(&state, project_id, equipment_items)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        bill_of_materials_filename(&title)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bill_of_materials_csv(&items),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use crate::app::{testing, AppState};
    use crate::routes::test_support::{app, send, send_raw};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    async fn project(state: &Arc<AppState>) -> String {
        let (_, body) = send(
            state,
            Method::POST,
            "/projects",
            Some(json!({"title": "Roof Retrofit", "strategy": "lean"})),
        )
        .await;
        body["data"]["id"].as_str().unwrap().to_string()
    }

    async fn add(state: &Arc<AppState>, project_id: &str, item: serde_json::Value) -> String {
        let (status, body) = send(
            state,
            Method::POST,
            &format!("/projects/{}/equipment", project_id),
            Some(item),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_bill_of_materials_lifecycle() {
        let state = testing::state();
        let id = project(&state).await;

        let (status, _) = send(&state, Method::POST, &format!("/projects/{}/bill-of-materials", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        add(&state, &id, json!({"name": "Solar Panel", "manufacturer": "SunPower", "model": "SP-400W", "quantity": 12})).await;
        add(&state, &id, json!({"name": "Inverter", "manufacturer": "SMA", "quantity": 1})).await;
        add(&state, &id, json!({"name": "Battery", "manufacturer": "Tesla", "quantity": 2})).await;

        let (status, body) = send(&state, Method::POST, &format!("/projects/{}/bill-of-materials", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);

        let (_, body) = send(&state, Method::GET, &format!("/projects/{}/bill-of-materials/summary", id), None).await;
        assert_eq!(
            body["data"],
            json!({"totalPanels": 12, "totalInverters": 1, "additionalItems": 2})
        );

        let (status, body) = send(
            &state,
            Method::PATCH,
            &format!("/projects/{}/bill-of-materials", id),
            Some(json!({"totalCost": "18250.50"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["totalCost"], "18250.50");
    }

    #[tokio::test]
    async fn test_summary_requires_equipment() {
        let state = testing::state();
        let id = project(&state).await;

        let (status, body) = send(&state, Method::GET, &format!("/projects/{}/bill-of-materials/summary", id), None).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_summary_reads_live_equipment_before_generation() {
        let state = testing::state();
        let id = project(&state).await;
        add(&state, &id, json!({"name": "Solar Panel", "manufacturer": "LG", "quantity": 10})).await;

        let (status, body) = send(&state, Method::GET, &format!("/projects/{}/bill-of-materials/summary", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"],
            json!({"totalPanels": 10, "totalInverters": 0, "additionalItems": 0})
        );

        let (_, project) = send(&state, Method::GET, &format!("/projects/{}", id), None).await;
        assert!(project["data"].get("billOfMaterials").is_none());
    }

    #[tokio::test]
    async fn test_csv_export() {
        let state = testing::state();
        let id = project(&state).await;
        add(&state, &id, json!({"name": "Inverter", "manufacturer": "SMA", "model": "SB-7.7", "quantity": 1})).await;

        let response = app(&state)
            .oneshot(
                Request::get(format!("/projects/{}/bill-of-materials.csv", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Roof_Retrofit_BOM.csv\""
        );

        let (status, csv) = send_raw(&state, Method::GET, &format!("/projects/{}/bill-of-materials.csv", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            csv,
            "Name,Manufacturer,Model,Quantity,Specifications\n\"Inverter\",\"SMA\",\"SB-7.7\",\"1\",\"\""
        );
    }

    #[tokio::test]
    async fn test_equipment_update_delete_and_installation_lookup() {
        let state = testing::state();
        let id = project(&state).await;
        let eid = add(&state, &id, json!({"name": "Inverter", "manufacturer": "Enphase", "quantity": 1})).await;
        let uri = format!("/projects/{}/equipment/{}", id, eid);

        let (status, body) = send(&state, Method::PATCH, &uri, Some(json!({"quantity": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");

        let (_, body) = send(&state, Method::PATCH, &uri, Some(json!({"quantity": 2}))).await;
        assert_eq!(body["data"]["quantity"], 2);

        let (status, body) = send(&state, Method::POST, &format!("{}/installation", uri), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["data"]["installationUrl"],
            "https://enphase.com/download/iq7-iq7-iq7x-installation-and-operation-manual"
        );

        let (status, _) = send(&state, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&state, Method::POST, &format!("{}/installation", uri), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
