//! Pure P&L computation engine.
//!
//! Layers, leaves first:
//! - `reference`: conversion factors and futures contract sizes per product
//! - `vessel`: premium and futures P&L of a single vessel
//! - `portfolio`: fleet-wide totals, optionally scoped to one counterparty
//! - `shares` and `breakdown`: per-counterparty figures and percentage shares
//!
//! Nothing here performs I/O or holds state between calls.

pub mod breakdown;
pub mod portfolio;
pub mod reference;
pub mod shares;
pub mod vessel;
pub mod weighted;

pub use breakdown::{by_counterparty, CounterpartyPnl};
pub use portfolio::{compute_portfolio_pnl, PortfolioPnl};
pub use reference::{
    contract_size, contracts_to_volume, conversion_factor, overcoverage, volume_to_contracts,
};
pub use shares::{with_shares, with_shares_of_sum, Share};
pub use vessel::{compute_vessel_pnl, vessel_pnl, VesselPnl};
pub use weighted::{safe_div, WeightedSum};
