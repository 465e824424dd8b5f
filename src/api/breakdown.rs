use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::{non_blank, AppState};
use crate::engine::{by_counterparty, with_shares_of_sum, CounterpartyPnl, Share};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownMetric {
    Pnl,
    Volume,
}

impl FromStr for BreakdownMetric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pnl" => Ok(BreakdownMetric::Pnl),
            "volume" => Ok(BreakdownMetric::Volume),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownQuery {
    pub metric: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub metric: BreakdownMetric,
    pub entries: Vec<Share<CounterpartyPnl>>,
}

/// Per-counterparty P&L or sold volume with each entry's share of the total.
pub async fn get_breakdown(
    Query(params): Query<BreakdownQuery>,
    State(state): State<AppState>,
) -> Result<Json<BreakdownResponse>, AppError> {
    let metric = match non_blank(params.metric.as_deref()) {
        None => BreakdownMetric::Pnl,
        Some(raw) => BreakdownMetric::from_str(raw)
            .map_err(|_| AppError::BadRequest("metric must be one of: pnl, volume".to_string()))?,
    };

    let vessels = state.repo.load_vessels().await?;
    let per_counterparty = by_counterparty(&vessels)?;

    let entries = match metric {
        BreakdownMetric::Pnl => with_shares_of_sum(per_counterparty, |c| c.total_pnl),
        BreakdownMetric::Volume => with_shares_of_sum(per_counterparty, |c| c.sold_volume),
    };

    Ok(Json(BreakdownResponse { metric, entries }))
}
