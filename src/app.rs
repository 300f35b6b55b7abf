use axum::{extract::DefaultBodyLimit, http::HeaderValue, Router};
use parking_lot::RwLock;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Settings;
use crate::middleware::request_id_layer;
use crate::routes;
use crate::services::{PlanGenerator, PlanSetAnalyzer, ResearchProvider};
use crate::store::{ProjectStore, SolarStore, TaskStore};

/// Attachments and plan set images may arrive inline as data URIs.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state
///
/// Store locks are only held for the duration of one store call and are
/// never held across an `.await`.
pub struct AppState {
    pub settings: Settings,
    pub projects: RwLock<ProjectStore>,
    pub solar: RwLock<SolarStore>,
    pub tasks: RwLock<TaskStore>,
    pub research: Arc<dyn ResearchProvider>,
    pub planner: Arc<dyn PlanGenerator>,
    pub analyzer: Arc<dyn PlanSetAnalyzer>,
}

impl AppState {
    pub fn new(
        settings: Settings,
        projects: ProjectStore,
        solar: SolarStore,
        research: Arc<dyn ResearchProvider>,
        planner: Arc<dyn PlanGenerator>,
        analyzer: Arc<dyn PlanSetAnalyzer>,
    ) -> Arc<Self> {
        Arc::new(Self {
            settings,
            projects: RwLock::new(projects),
            solar: RwLock::new(solar),
            tasks: RwLock::new(TaskStore::new()),
            research,
            planner,
            analyzer,
        })
    }
}

/// Build the complete application with all middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.settings);

    // Build trace layer (use DEBUG for spans to reduce overhead at INFO level)
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::DEBUG));

    let (set_request_id, propagate_request_id) = request_id_layer();

    Router::new()
        .merge(routes::api_router())
        // Middleware stack (applied bottom-up)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(propagate_request_id)
        .layer(trace_layer)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .cors_allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    // Longer preflight cache in development
    let max_age = if settings.env.is_dev() {
        std::time::Duration::from_secs(86400)
    } else {
        std::time::Duration::from_secs(3600)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            axum::http::HeaderName::from_static("x-request-id"),
        ]))
        .max_age(max_age)
}
