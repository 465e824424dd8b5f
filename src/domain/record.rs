//! Raw vessel, sale and hedge records as read from the store.
//!
//! These mirror the store rows one-to-one: products are raw codes and prices are
//! optional. They are turned into [`Vessel`](super::Vessel) once, at the input
//! boundary, by [`VesselRecord::validate`].

use crate::domain::{Counterparty, DealType, Decimal, SaleId, SupplierRef, VesselId};
use serde::{Deserialize, Serialize};

/// A futures hedge, either on the purchase side (tied to a vessel) or on the
/// sale side (tied to a sale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hedge {
    /// Tonnes covered by this hedge.
    pub volume: Decimal,
    /// Futures price in the product's native exchange quote.
    pub price: Decimal,
    /// Number of exchange contracts booked.
    #[serde(default)]
    pub contracts: u32,
}

impl Hedge {
    pub fn new(volume: Decimal, price: Decimal, contracts: u32) -> Self {
        Self {
            volume,
            price,
            contracts,
        }
    }
}

/// One sale allocation of a vessel's cargo to a counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub counterparty: Counterparty,
    pub deal_type: DealType,
    /// Tonnes sold.
    pub volume: Decimal,
    pub sale_premium: Option<Decimal>,
    pub sale_flat_price: Option<Decimal>,
    #[serde(default)]
    pub hedges: Vec<Hedge>,
}

/// One purchased cargo with its purchase hedges and sales embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub id: VesselId,
    pub name: String,
    /// Raw product code; resolved against the reference tables on validation.
    pub product: String,
    /// Tonnes purchased.
    pub volume: Decimal,
    pub purchase_premium: Option<Decimal>,
    pub purchase_flat_price: Option<Decimal>,
    pub supplier: Option<SupplierRef>,
    #[serde(default)]
    pub purchase_hedges: Vec<Hedge>,
    #[serde(default)]
    pub sales: Vec<SaleRecord>,
}
