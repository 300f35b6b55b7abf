mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod routes;
mod services;
mod store;

use anyhow::Result;
use std::sync::Arc;

use services::{AiClient, CatalogAnalyzer, PlanClient, ResearchClient};
use store::{seed, ProjectStore, SolarStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        seed_data = settings.seed_data,
        "Starting PlanForge backend"
    );

    // One pooled HTTP client shared by both AI services
    let ai_client = AiClient::new(settings.ai_timeout_seconds)?;

    let research = ResearchClient::new(
        ai_client.clone(),
        &settings.research_api_url,
        settings.research_api_key.clone(),
    );
    let planner = PlanClient::new(
        ai_client,
        &settings.plan_api_url,
        settings.plan_api_key.clone(),
        &settings.plan_model,
        settings.plan_max_tokens,
    );

    if settings.research_api_key.is_none() {
        tracing::warn!("RESEARCH_API_KEY not set - research will use placeholder content");
    }
    if settings.plan_api_key.is_none() {
        tracing::warn!("PLAN_API_KEY not set - plans will use the placeholder plan");
    }

    let (projects, solar) = if settings.seed_data {
        (
            ProjectStore::with_projects(seed::projects()),
            SolarStore::with_projects(seed::solar_projects()),
        )
    } else {
        (ProjectStore::new(), SolarStore::new())
    };

    // Create application state
    let state = app::AppState::new(
        settings.clone(),
        projects,
        solar,
        Arc::new(research),
        Arc::new(planner),
        Arc::new(CatalogAnalyzer),
    );

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
