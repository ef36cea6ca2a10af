//! HTTP request handlers.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{ChatRequest, ChatResponse, HealthStatus};
use crate::trading::AnalysisResult;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub user_id: Option<String>,
}

pub async fn trade_analysis(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing user_id parameter"))?;

    let trades = state
        .store
        .recent_trades(&user_id, state.trade_limit)
        .await
        .map_err(|e| {
            warn!("Trade query failed for {}: {}", user_id, e);
            ApiError::internal(format!("Error analyzing trades: {}", e))
        })?;

    let analysis = state.analyzer.analyze(&trades);
    info!(
        "Analyzed {} trades for {}: WR {:.1}% avg ${:.2}",
        trades.len(),
        user_id,
        analysis.win_rate * 100.0,
        analysis.avg_profit_loss
    );

    Ok(Json(analysis))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e.body_text())))?;

    let user_id = request
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing user_id"))?;

    let message = request
        .last_user_message()
        .ok_or_else(|| ApiError::bad_request("No user message found"))?;

    let trades = state
        .store
        .recent_trades(user_id, state.trade_limit)
        .await
        .map_err(|e| {
            warn!("Trade query failed for {}: {}", user_id, e);
            ApiError::internal(format!("Error processing chat: {}", e))
        })?;

    let analysis = state.analyzer.analyze(&trades);
    let response = state.coach.respond(message, &analysis).await;
    info!(
        "Coached {} on {} trades ({} chars)",
        user_id,
        trades.len(),
        response.chars().count()
    );

    Ok(Json(ChatResponse { response, analysis }))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        message: "Trade Analysis API is running".to_string(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
