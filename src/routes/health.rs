use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
    pub projects: usize,
    pub solar_projects: usize,
}

/// Whether each AI service has credentials; unconfigured services fall back
/// to placeholder content.
#[derive(Serialize)]
pub struct ServiceHealth {
    pub research: String,
    pub plan_generation: String,
}

fn configured(key: &Option<String>) -> String {
    let status = if key.is_some() { "configured" } else { "placeholder" };
    status.to_string()
}

/// Health check endpoint - public
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let projects = state.projects.read().list().len();
    let solar_projects = state.solar.read().list().len();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceHealth {
            research: configured(&state.settings.research_api_key),
            plan_generation: configured(&state.settings.plan_api_key),
        },
        projects,
        solar_projects,
    })
}

#[cfg(test)]
mod tests {
    use crate::app::testing;
    use crate::routes::test_support::send;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health_reports_placeholder_services() {
        let state = testing::state();

        let (status, body) = send(&state, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["services"]["research"], "placeholder");
        assert_eq!(body["projects"], 0);
    }
}
