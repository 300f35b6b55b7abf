use axum::{extract::Path, Json};
use serde::Deserialize;

use crate::api::DataResponse;
use crate::domain::strategies::{
    recommended_strategies, strategy_by_id, StrategyOption, STRATEGIES,
};
use crate::domain::StrategyType;
use crate::error::{ApiError, ApiResult};

/// All strategies in reference-table order
pub async fn list_strategies() -> DataResponse<&'static [StrategyOption]> {
    DataResponse::new(&STRATEGIES[..])
}

pub async fn get_strategy(
    Path(strategy_id): Path<String>,
) -> ApiResult<DataResponse<&'static StrategyOption>> {
    let id = StrategyType::parse(&strategy_id)
        .ok_or_else(|| ApiError::NotFound(format!("Strategy {} not found", strategy_id)))?;

    Ok(DataResponse::new(strategy_by_id(id)))
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub description: String,
}

pub async fn recommend_strategies(
    Json(req): Json<RecommendRequest>,
) -> DataResponse<Vec<&'static StrategyOption>> {
    tracing::debug!(chars = req.description.len(), "Recommending strategies");
    DataResponse::new(recommended_strategies(&req.description))
}
