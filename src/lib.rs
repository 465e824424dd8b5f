pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    Counterparty, DealType, Decimal, Hedge, Product, SaleId, SaleRecord, SupplierRef, Vessel,
    VesselId, VesselRecord,
};
pub use engine::{compute_portfolio_pnl, compute_vessel_pnl, PortfolioPnl, VesselPnl};
pub use error::{AppError, EngineError};
