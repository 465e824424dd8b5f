//! Domain types for commodity vessel positions.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - Domain primitives: VesselId, SaleId, Counterparty, SupplierRef, DealType
//! - Product identity
//! - Raw store records and their validated forms

pub mod decimal;
pub mod primitives;
pub mod product;
pub mod record;
pub mod vessel;

pub use decimal::Decimal;
pub use primitives::{Counterparty, DealType, SaleId, SupplierRef, VesselId};
pub use product::Product;
pub use record::{Hedge, SaleRecord, VesselRecord};
pub use vessel::{check_price, check_volume, PurchasePricing, Sale, SalePricing, Vessel, MAX_FIGURE};
