use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{non_blank, AppState};
use crate::domain::{Counterparty, VesselId};
use crate::engine::{compute_portfolio_pnl, compute_vessel_pnl, PortfolioPnl, VesselPnl};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioQuery {
    /// Restrict sales to one counterparty's allocations.
    pub counterparty: Option<String>,
}

pub async fn get_vessel_pnl(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<VesselPnl>, AppError> {
    let vessel_id = VesselId::new(id);
    let record = state
        .repo
        .load_vessel(vessel_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vessel {}", vessel_id)))?;

    let pnl = compute_vessel_pnl(&record).map_err(|e| {
        tracing::warn!(vessel_id = %vessel_id, error = %e, "Vessel P&L rejected");
        AppError::from(e)
    })?;

    Ok(Json(pnl))
}

pub async fn get_portfolio_pnl(
    Query(params): Query<PortfolioQuery>,
    State(state): State<AppState>,
) -> Result<Json<PortfolioPnl>, AppError> {
    let scope = non_blank(params.counterparty.as_deref()).map(Counterparty::new);

    let vessels = state.repo.load_vessels().await?;
    let portfolio = compute_portfolio_pnl(&vessels, scope.as_ref())?;

    tracing::info!(
        vessels = portfolio.vessel_count,
        scope = scope.as_ref().map(Counterparty::as_str).unwrap_or("all"),
        total_pnl = %portfolio.total_pnl,
        "Portfolio P&L served"
    );

    Ok(Json(portfolio))
}
