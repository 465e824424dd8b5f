//! Fleet-wide aggregation of vessel P&L.

use super::vessel::{vessel_pnl, VesselPnl};
use crate::domain::{Counterparty, Decimal, VesselRecord};
use crate::error::EngineError;
use serde::Serialize;
use tracing::debug;

/// Totals across a set of vessels, plus the per-vessel results in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PortfolioPnl {
    pub vessel_count: usize,
    pub premium_pnl: Decimal,
    pub futures_pnl: Decimal,
    pub total_pnl: Decimal,
    pub purchased_volume: Decimal,
    pub vessels: Vec<VesselPnl>,
}

impl PortfolioPnl {
    fn push(&mut self, pnl: VesselPnl) {
        self.vessel_count += 1;
        self.premium_pnl += pnl.premium_pnl;
        self.futures_pnl += pnl.futures_pnl;
        self.total_pnl += pnl.total_pnl;
        self.purchased_volume += pnl.purchased_volume;
        self.vessels.push(pnl);
    }
}

/// Compute P&L for every vessel and sum the results.
///
/// With a `scope`, each vessel only keeps the sales allocated to that
/// counterparty. Vessels with no matching sale still appear, with their
/// purchase-side figures intact and zero sale-derived figures.
///
/// # Errors
/// Returns the validation error of the first vessel that fails validation,
/// typically `EngineError::UnknownProduct`.
pub fn compute_portfolio_pnl(
    vessels: &[VesselRecord],
    scope: Option<&Counterparty>,
) -> Result<PortfolioPnl, EngineError> {
    debug!(
        vessel_count = vessels.len(),
        scope = scope.map(Counterparty::as_str).unwrap_or("all"),
        "Computing portfolio P&L"
    );

    let mut portfolio = PortfolioPnl::default();
    for record in vessels {
        let mut vessel = record.validate()?;
        if let Some(counterparty) = scope {
            vessel.retain_sales_for(counterparty);
        }
        portfolio.push(vessel_pnl(&vessel));
    }

    Ok(portfolio)
}
