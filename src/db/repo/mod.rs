//! Repository layer for the vessel store.
//!
//! Methods are organized across submodules:
//! - `vessels.rs` - vessel and purchase-hedge writes
//! - `sales.rs` - sale and sale-hedge writes
//! - `snapshot.rs` - denormalized vessel reads for the P&L engine

mod sales;
mod snapshot;
mod vessels;

use crate::domain::{Counterparty, DealType, Decimal, SupplierRef};
use sqlx::sqlite::SqlitePool;
use std::str::FromStr;

/// A vessel purchase to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVessel {
    pub name: String,
    pub product: String,
    pub volume: Decimal,
    pub purchase_premium: Option<Decimal>,
    pub purchase_flat_price: Option<Decimal>,
    pub supplier: Option<SupplierRef>,
}

/// A sale allocation to record against a vessel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub counterparty: Counterparty,
    pub deal_type: DealType,
    pub volume: Decimal,
    pub sale_premium: Option<Decimal>,
    pub sale_flat_price: Option<Decimal>,
}

/// Repository for store operations.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Repository { pool }
    }
}

/// Parse a stored decimal. Corrupt text is a decode error, never a zero.
fn parse_decimal(
    table: &str,
    row_id: i64,
    column: &str,
    raw: &str,
) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(raw).map_err(|e| {
        sqlx::Error::Decode(format!("{} {} {}: {:?}: {}", table, row_id, column, raw, e).into())
    })
}

fn parse_optional_decimal(
    table: &str,
    row_id: i64,
    column: &str,
    raw: Option<String>,
) -> Result<Option<Decimal>, sqlx::Error> {
    raw.map(|s| parse_decimal(table, row_id, column, &s))
        .transpose()
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
