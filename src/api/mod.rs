pub mod breakdown;
pub mod contracts;
pub mod health;
pub mod pnl;

use crate::config::Config;
use crate::db::Repository;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config) -> Self {
        Self { repo, config }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/vessels/:id/pnl", get(pnl::get_vessel_pnl))
        .route("/v1/portfolio/pnl", get(pnl::get_portfolio_pnl))
        .route("/v1/portfolio/breakdown", get(breakdown::get_breakdown))
        .route("/v1/contracts", get(contracts::get_contracts))
        .layer(cors)
        .with_state(state)
}

/// Trim an optional query parameter, treating blank as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
