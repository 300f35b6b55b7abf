pub mod attachments;
pub mod daily_updates;
pub mod equipment;
pub mod health;
pub mod projects;
pub mod solar_files;
pub mod solar_projects;
pub mod solar_tasks;
pub mod strategies;
pub mod tasks;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;

/// Body of the "select current project" endpoints
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectProjectRequest {
    pub project_id: Uuid,
}

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Strategies
        .route("/strategies", get(strategies::list_strategies))
        .route("/strategies/recommend", post(strategies::recommend_strategies))
        .route("/strategies/:strategy_id", get(strategies::get_strategy))
        // Projects
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/current",
            get(projects::get_current_project).put(projects::select_current_project),
        )
        .route("/projects/plan", post(projects::create_planned_project))
        .route(
            "/projects/:project_id",
            get(projects::get_project)
                .patch(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/:project_id/plan",
            put(projects::set_plan).patch(projects::update_plan),
        )
        // Attachments (nested under projects)
        .route(
            "/projects/:project_id/attachments",
            post(attachments::add_attachment),
        )
        .route(
            "/projects/:project_id/attachments/:attachment_id",
            axum::routing::delete(attachments::delete_attachment),
        )
        .route(
            "/projects/:project_id/attachments/:attachment_id/analyze",
            post(attachments::analyze_attachment),
        )
        .route(
            "/projects/:project_id/attachments/:attachment_id/analyzed",
            put(attachments::mark_analyzed),
        )
        // Equipment and bill of materials
        .route(
            "/projects/:project_id/equipment",
            post(equipment::add_equipment),
        )
        .route(
            "/projects/:project_id/equipment/:equipment_id",
            patch(equipment::update_equipment).delete(equipment::delete_equipment),
        )
        .route(
            "/projects/:project_id/equipment/:equipment_id/installation",
            post(equipment::find_installation_instructions),
        )
        .route(
            "/projects/:project_id/bill-of-materials",
            post(equipment::generate_bill_of_materials).patch(equipment::update_bill_of_materials),
        )
        .route(
            "/projects/:project_id/bill-of-materials/summary",
            get(equipment::get_bill_of_materials_summary),
        )
        .route(
            "/projects/:project_id/bill-of-materials.csv",
            get(equipment::export_bill_of_materials),
        )
        // Task board
        .route(
            "/tasks",
            get(tasks::list_tasks)
                .post(tasks::create_task)
                .put(tasks::replace_tasks),
        )
        .route(
            "/tasks/active",
            get(tasks::get_active_task).put(tasks::set_active_task),
        )
        .route(
            "/tasks/:task_id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        // Solar projects
        .route(
            "/solar/projects",
            get(solar_projects::list_projects)
                .post(solar_projects::create_project)
                .put(solar_projects::replace_projects),
        )
        .route(
            "/solar/projects/:project_id",
            get(solar_projects::get_project)
                .patch(solar_projects::update_project)
                .delete(solar_projects::delete_project),
        )
        .route(
            "/solar/projects/:project_id/progress",
            get(solar_projects::get_progress),
        )
        .route(
            "/solar/current",
            get(solar_projects::get_current_project).put(solar_projects::set_current_project),
        )
        // Solar children
        .route(
            "/solar/projects/:project_id/tasks",
            post(solar_tasks::add_task),
        )
        .route(
            "/solar/projects/:project_id/tasks/:task_id",
            patch(solar_tasks::update_task).delete(solar_tasks::delete_task),
        )
        .route(
            "/solar/projects/:project_id/plan-set-images",
            post(solar_files::add_plan_set_image),
        )
        .route(
            "/solar/projects/:project_id/plan-set-images/:image_id",
            patch(solar_files::update_plan_set_image).delete(solar_files::delete_plan_set_image),
        )
        .route(
            "/solar/projects/:project_id/documents",
            post(solar_files::add_document),
        )
        .route(
            "/solar/projects/:project_id/documents/:document_id",
            patch(solar_files::update_document).delete(solar_files::delete_document),
        )
        .route(
            "/solar/projects/:project_id/daily-updates",
            post(daily_updates::add_daily_update),
        )
        .route(
            "/solar/projects/:project_id/daily-updates/:update_id",
            patch(daily_updates::update_daily_update).delete(daily_updates::delete_daily_update),
        )
}
