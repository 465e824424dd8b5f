//! Per-vessel premium and futures P&L.

use super::reference::{conversion_factor, volume_to_contracts};
use super::weighted::WeightedSum;
use crate::domain::{DealType, Decimal, Hedge, Product, Vessel, VesselId, VesselRecord};
use crate::error::EngineError;
use serde::Serialize;
use tracing::debug;

/// P&L of one vessel, with the intermediate averages and volumes it was built from.
///
/// Prices suffixed `_converted` are in $/tonne; the others are in the product's
/// native exchange quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VesselPnl {
    pub vessel_id: VesselId,
    pub vessel_name: String,
    pub product: Product,

    pub purchase_premium: Decimal,
    pub purchase_premium_converted: Decimal,
    /// Set only when the purchase was priced outright.
    pub purchase_flat_price: Option<Decimal>,
    /// Volume-weighted over premium-type sales.
    pub sale_premium_avg: Decimal,
    pub sale_premium_converted: Decimal,
    pub premium_pnl: Decimal,

    /// Volume-weighted over purchase hedges.
    pub purchase_futures_avg: Decimal,
    pub purchase_futures_converted: Decimal,
    /// Volume-weighted over the hedges of every sale.
    pub sale_futures_avg: Decimal,
    pub sale_futures_converted: Decimal,
    pub futures_pnl: Decimal,

    pub total_pnl: Decimal,

    pub purchased_volume: Decimal,
    pub sold_volume: Decimal,
    /// Volume sold on a premium basis; the premium spread applies to this.
    pub premium_volume: Decimal,
    pub purchase_hedge_volume: Decimal,
    pub sale_hedge_volume: Decimal,
    /// Volume hedged on both legs; the futures spread applies to this.
    pub futures_volume: Decimal,

    /// Whole contracts needed to cover each hedge leg.
    pub purchase_hedge_contracts: Decimal,
    pub sale_hedge_contracts: Decimal,
}

fn hedge_sum<'a>(hedges: impl IntoIterator<Item = &'a Hedge>) -> WeightedSum {
    hedges
        .into_iter()
        .map(|hedge| (hedge.price, hedge.volume))
        .collect()
}

/// Validate a raw record and compute its P&L.
///
/// # Errors
/// Returns `EngineError::UnknownProduct` if the record's product is not in the
/// reference tables, or `EngineError::OutOfRange` for a figure outside the
/// accepted bounds. No partial result is produced in either case.
pub fn compute_vessel_pnl(record: &VesselRecord) -> Result<VesselPnl, EngineError> {
    let vessel = record.validate()?;
    Ok(vessel_pnl(&vessel))
}

/// Compute the P&L of an already validated vessel.
pub fn vessel_pnl(vessel: &Vessel) -> VesselPnl {
    let factor = conversion_factor(vessel.product);

    // Premium leg.
    let sale_premiums: WeightedSum = vessel
        .sales
        .iter()
        .filter(|sale| sale.deal_type() == DealType::Premium)
        .map(|sale| (sale.premium().unwrap_or_else(Decimal::zero), sale.volume))
        .collect();

    let purchase_premium = vessel.pricing.premium();
    let purchase_premium_converted = purchase_premium * factor;
    let sale_premium_avg = sale_premiums.average();
    let sale_premium_converted = sale_premium_avg * factor;
    let premium_volume = sale_premiums.total_weight();
    let premium_pnl = if premium_volume.is_zero() {
        Decimal::zero()
    } else {
        (sale_premium_converted - purchase_premium_converted) * premium_volume
    };

    // Futures leg.
    let purchase_futures = hedge_sum(&vessel.purchase_hedges);
    let sale_futures = hedge_sum(vessel.sale_hedges());

    let purchase_futures_avg = purchase_futures.average();
    let sale_futures_avg = sale_futures.average();
    let purchase_futures_converted = purchase_futures_avg * factor;
    let sale_futures_converted = sale_futures_avg * factor;
    let purchase_hedge_volume = purchase_futures.total_weight();
    let sale_hedge_volume = sale_futures.total_weight();
    let futures_volume = purchase_hedge_volume
        .min(sale_hedge_volume)
        .max(Decimal::zero());
    let futures_pnl = if futures_volume.is_zero() {
        Decimal::zero()
    } else {
        (sale_futures_converted - purchase_futures_converted) * futures_volume
    };

    let sold_volume: Decimal = vessel.sales.iter().map(|sale| sale.volume).sum();

    debug!(
        vessel_id = %vessel.id,
        product = %vessel.product,
        premium_pnl = %premium_pnl,
        futures_pnl = %futures_pnl,
        "Computed vessel P&L"
    );

    VesselPnl {
        vessel_id: vessel.id,
        vessel_name: vessel.name.clone(),
        product: vessel.product,
        purchase_premium,
        purchase_premium_converted,
        purchase_flat_price: vessel.pricing.flat_price(),
        sale_premium_avg,
        sale_premium_converted,
        premium_pnl,
        purchase_futures_avg,
        purchase_futures_converted,
        sale_futures_avg,
        sale_futures_converted,
        futures_pnl,
        total_pnl: premium_pnl + futures_pnl,
        purchased_volume: vessel.volume,
        sold_volume,
        premium_volume,
        purchase_hedge_volume,
        sale_hedge_volume,
        futures_volume,
        purchase_hedge_contracts: volume_to_contracts(purchase_hedge_volume, vessel.product),
        sale_hedge_contracts: volume_to_contracts(sale_hedge_volume, vessel.product),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Counterparty, SaleId, SaleRecord};

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn vessel(product: &str, purchase_premium: Option<&str>) -> VesselRecord {
        VesselRecord {
            id: VesselId::new(1),
            name: "MV Unit".to_string(),
            product: product.to_string(),
            volume: d("1000"),
            purchase_premium: purchase_premium.map(d),
            purchase_flat_price: None,
            supplier: None,
            purchase_hedges: vec![],
            sales: vec![],
        }
    }

    fn premium_sale(id: i64, volume: &str, premium: &str) -> SaleRecord {
        SaleRecord {
            id: SaleId::new(id),
            counterparty: Counterparty::new("ADM"),
            deal_type: DealType::Premium,
            volume: d(volume),
            sale_premium: Some(d(premium)),
            sale_flat_price: None,
            hedges: vec![],
        }
    }

    #[test]
    fn test_soybean_meal_premium_pnl() {
        let mut v = vessel("soybean_meal", Some("10"));
        v.sales = vec![premium_sale(1, "1000", "12")];

        let pnl = compute_vessel_pnl(&v).unwrap();
        assert_eq!(pnl.sale_premium_avg, d("12"));
        assert_eq!(pnl.premium_pnl, d("1814.4"));
        assert_eq!(pnl.futures_pnl, Decimal::zero());
        assert_eq!(pnl.total_pnl, d("1814.4"));
    }

    #[test]
    fn test_premium_spread_applies_to_premium_volume_only() {
        let mut v = vessel("wheat", Some("5"));
        v.sales = vec![premium_sale(1, "200", "8"), premium_sale(2, "300", "10")];
        let mut flat = premium_sale(3, "400", "0");
        flat.deal_type = DealType::Flat;
        flat.sale_premium = None;
        flat.sale_flat_price = Some(d("230"));
        v.sales.push(flat);

        let pnl = compute_vessel_pnl(&v).unwrap();
        // (8*200 + 10*300) / 500 = 9.2
        assert_eq!(pnl.sale_premium_avg, d("9.2"));
        assert_eq!(pnl.premium_volume, d("500"));
        assert_eq!(pnl.sold_volume, d("900"));
        assert_eq!(pnl.premium_pnl, d("2100"));
    }

    #[test]
    fn test_zero_volume_premium_sales_do_not_divide_by_zero() {
        let mut v = vessel("corn", Some("20"));
        v.sales = vec![premium_sale(1, "0", "30")];

        let pnl = compute_vessel_pnl(&v).unwrap();
        assert_eq!(pnl.sale_premium_avg, Decimal::zero());
        assert_eq!(pnl.premium_pnl, Decimal::zero());
    }

    #[test]
    fn test_hedge_contract_coverage() {
        let mut v = vessel("corn", None);
        v.purchase_hedges = vec![Hedge::new(d("5000"), d("450"), 40)];

        let pnl = compute_vessel_pnl(&v).unwrap();
        assert_eq!(pnl.purchase_hedge_contracts, d("40"));
        assert_eq!(pnl.sale_hedge_contracts, Decimal::zero());
        assert_eq!(pnl.futures_pnl, Decimal::zero());
    }

    #[test]
    fn test_unknown_product_yields_no_result() {
        let v = vessel("sorghum", Some("10"));
        assert_eq!(
            compute_vessel_pnl(&v),
            Err(EngineError::UnknownProduct("sorghum".to_string()))
        );
    }
}
