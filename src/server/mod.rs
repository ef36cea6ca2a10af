//! HTTP surface: trade analysis, coaching chat and health endpoints.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::*;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::coach::CoachResponder;
use crate::store::TradeStore;
use crate::trading::TradeAnalyzer;

pub const DEFAULT_TRADE_LIMIT: usize = 100;

pub struct AppState {
    pub store: Arc<dyn TradeStore>,
    pub analyzer: TradeAnalyzer,
    pub coach: CoachResponder,
    pub trade_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn TradeStore>, analyzer: TradeAnalyzer, coach: CoachResponder) -> Self {
        Self {
            store,
            analyzer,
            coach,
            trade_limit: DEFAULT_TRADE_LIMIT,
        }
    }

    pub fn with_trade_limit(mut self, limit: usize) -> Self {
        self.trade_limit = limit;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/trade-analysis", get(handlers::trade_analysis))
        .route("/api/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
