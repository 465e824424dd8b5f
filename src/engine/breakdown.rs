//! Per-counterparty roll-up of sold volume and P&L.

use super::vessel::vessel_pnl;
use super::weighted::safe_div;
use crate::domain::{Counterparty, Decimal, VesselRecord};
use crate::error::EngineError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterpartyPnl {
    pub counterparty: Counterparty,
    pub sold_volume: Decimal,
    /// This counterparty's part of the volume hedged on both legs.
    pub futures_volume: Decimal,
    pub premium_pnl: Decimal,
    pub futures_pnl: Decimal,
    pub total_pnl: Decimal,
}

impl CounterpartyPnl {
    fn new(counterparty: Counterparty) -> Self {
        Self {
            counterparty,
            sold_volume: Decimal::zero(),
            futures_volume: Decimal::zero(),
            premium_pnl: Decimal::zero(),
            futures_pnl: Decimal::zero(),
            total_pnl: Decimal::zero(),
        }
    }
}

/// One entry per counterparty holding at least one sale, ordered by counterparty.
///
/// Premium P&L is that of the counterparty's own sales. Each vessel's futures
/// volume is split across its counterparties in proportion to their sale-hedge
/// volume and priced at their own sale futures average, so the entries add up
/// to the fleet totals.
///
/// # Errors
/// Returns the first validation error of any vessel.
pub fn by_counterparty(vessels: &[VesselRecord]) -> Result<Vec<CounterpartyPnl>, EngineError> {
    let mut totals: BTreeMap<Counterparty, CounterpartyPnl> = BTreeMap::new();

    for record in vessels {
        let vessel = record.validate()?;
        let fleet = vessel_pnl(&vessel);
        let counterparties: BTreeSet<&Counterparty> =
            vessel.sales.iter().map(|sale| &sale.counterparty).collect();

        for counterparty in counterparties {
            let mut scoped = vessel.clone();
            scoped.retain_sales_for(counterparty);
            let own = vessel_pnl(&scoped);

            let futures_volume = safe_div(
                fleet.futures_volume * own.sale_hedge_volume,
                fleet.sale_hedge_volume,
            );
            let futures_pnl = if futures_volume.is_zero() {
                Decimal::zero()
            } else {
                (own.sale_futures_converted - fleet.purchase_futures_converted) * futures_volume
            };

            let entry = totals
                .entry(counterparty.clone())
                .or_insert_with(|| CounterpartyPnl::new(counterparty.clone()));
            entry.sold_volume += own.sold_volume;
            entry.futures_volume += futures_volume;
            entry.premium_pnl += own.premium_pnl;
            entry.futures_pnl += futures_pnl;
            entry.total_pnl += own.premium_pnl + futures_pnl;
        }
    }

    Ok(totals.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DealType, Hedge, SaleId, SaleRecord, VesselId};
    use crate::engine::compute_portfolio_pnl;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn sale(id: i64, counterparty: &str, volume: &str, premium: &str) -> SaleRecord {
        SaleRecord {
            id: SaleId::new(id),
            counterparty: Counterparty::new(counterparty),
            deal_type: DealType::Premium,
            volume: d(volume),
            sale_premium: Some(d(premium)),
            sale_flat_price: None,
            hedges: vec![],
        }
    }

    fn barley_vessel(id: i64, sales: Vec<SaleRecord>) -> VesselRecord {
        VesselRecord {
            id: VesselId::new(id),
            name: format!("MV {}", id),
            product: "barley".to_string(),
            volume: d("1000"),
            purchase_premium: Some(d("10")),
            purchase_flat_price: None,
            supplier: None,
            purchase_hedges: vec![],
            sales,
        }
    }

    #[test]
    fn test_breakdown_groups_by_counterparty() {
        let vessels = vec![
            barley_vessel(1, vec![sale(1, "Cofco", "100", "12"), sale(2, "ADM", "50", "11")]),
            barley_vessel(2, vec![sale(3, "Cofco", "200", "9")]),
        ];

        let breakdown = by_counterparty(&vessels).unwrap();
        assert_eq!(breakdown.len(), 2);

        assert_eq!(breakdown[0].counterparty.as_str(), "ADM");
        assert_eq!(breakdown[0].sold_volume, d("50"));
        assert_eq!(breakdown[0].total_pnl, d("50"));

        assert_eq!(breakdown[1].counterparty.as_str(), "Cofco");
        assert_eq!(breakdown[1].sold_volume, d("300"));
        // (12 - 10) * 100 + (9 - 10) * 200
        assert_eq!(breakdown[1].premium_pnl, d("0"));
    }

    #[test]
    fn test_breakdown_of_unsold_fleet_is_empty() {
        let breakdown = by_counterparty(&[barley_vessel(1, vec![])]).unwrap();
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_shared_purchase_hedge_is_split_between_counterparties() {
        let mut adm = sale(1, "ADM", "100", "10");
        adm.hedges = vec![Hedge::new(d("100"), d("210"), 0)];
        let mut cofco = sale(2, "Cofco", "100", "10");
        cofco.hedges = vec![Hedge::new(d("100"), d("230"), 0)];
        let mut vessel = barley_vessel(1, vec![adm, cofco]);
        vessel.purchase_hedges = vec![Hedge::new(d("100"), d("200"), 0)];
        let vessels = vec![vessel];

        let breakdown = by_counterparty(&vessels).unwrap();
        assert_eq!(breakdown[0].futures_volume, d("50"));
        assert_eq!(breakdown[0].futures_pnl, d("500"));
        assert_eq!(breakdown[1].futures_volume, d("50"));
        assert_eq!(breakdown[1].futures_pnl, d("1500"));

        let fleet = compute_portfolio_pnl(&vessels, None).unwrap();
        assert_eq!(fleet.vessels[0].futures_volume, d("100"));
        let futures: Decimal = breakdown.iter().map(|c| c.futures_pnl).sum();
        let total: Decimal = breakdown.iter().map(|c| c.total_pnl).sum();
        assert_eq!(futures, fleet.futures_pnl);
        assert_eq!(total, fleet.total_pnl);
    }
}
