//! Denormalized vessel reads: each vessel with its purchase hedges and its
//! sales-with-hedges embedded, read inside one transaction so the engine sees
//! a consistent snapshot.

use crate::domain::{
    Counterparty, DealType, Hedge, SaleId, SaleRecord, SupplierRef, VesselId, VesselRecord,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, Transaction};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use super::{parse_decimal, parse_optional_decimal, Repository};

impl Repository {
    /// Load every vessel, ordered by id.
    ///
    /// # Errors
    /// Returns an error if any query fails.
    pub async fn load_vessels(&self) -> Result<Vec<VesselRecord>, sqlx::Error> {
        self.load_snapshot(None).await
    }

    /// Load one vessel, or `None` if it does not exist.
    ///
    /// # Errors
    /// Returns an error if any query fails.
    pub async fn load_vessel(&self, id: VesselId) -> Result<Option<VesselRecord>, sqlx::Error> {
        Ok(self.load_snapshot(Some(id)).await?.into_iter().next())
    }

    async fn load_snapshot(
        &self,
        only: Option<VesselId>,
    ) -> Result<Vec<VesselRecord>, sqlx::Error> {
        let only = only.map(|id| id.as_i64());
        let mut tx = self.pool.begin().await?;

        let mut purchase_hedges = query_purchase_hedges(&mut tx, only).await?;
        let mut sale_hedges = query_sale_hedges(&mut tx, only).await?;

        let sale_rows = sqlx::query(
            r#"
            SELECT id, vessel_id, counterparty, deal_type, volume, sale_premium, sale_flat_price
            FROM sales
            WHERE (? IS NULL OR vessel_id = ?)
            ORDER BY id ASC
            "#,
        )
        .bind(only)
        .bind(only)
        .fetch_all(&mut *tx)
        .await?;

        let mut sales: HashMap<i64, Vec<SaleRecord>> = HashMap::new();
        for row in &sale_rows {
            let id: i64 = row.get("id");
            let vessel_id: i64 = row.get("vessel_id");
            let deal_type_raw: String = row.get("deal_type");
            let deal_type = DealType::from_str(&deal_type_raw)
                .map_err(|e| sqlx::Error::Decode(format!("sale {}: {}", id, e).into()))?;

            sales.entry(vessel_id).or_default().push(SaleRecord {
                id: SaleId::new(id),
                counterparty: Counterparty::new(row.get::<String, _>("counterparty")),
                deal_type,
                volume: parse_decimal("sales", id, "volume", row.get("volume"))?,
                sale_premium: parse_optional_decimal(
                    "sales",
                    id,
                    "sale_premium",
                    row.get("sale_premium"),
                )?,
                sale_flat_price: parse_optional_decimal(
                    "sales",
                    id,
                    "sale_flat_price",
                    row.get("sale_flat_price"),
                )?,
                hedges: sale_hedges.remove(&id).unwrap_or_default(),
            });
        }

        let vessel_rows = sqlx::query(
            r#"
            SELECT id, name, product, volume, purchase_premium, purchase_flat_price, supplier
            FROM vessels
            WHERE (? IS NULL OR id = ?)
            ORDER BY id ASC
            "#,
        )
        .bind(only)
        .bind(only)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let vessels = vessel_rows
            .iter()
            .map(|row| -> Result<VesselRecord, sqlx::Error> {
                let id: i64 = row.get("id");
                Ok(VesselRecord {
                    id: VesselId::new(id),
                    name: row.get("name"),
                    product: row.get("product"),
                    volume: parse_decimal("vessels", id, "volume", row.get("volume"))?,
                    purchase_premium: parse_optional_decimal(
                        "vessels",
                        id,
                        "purchase_premium",
                        row.get("purchase_premium"),
                    )?,
                    purchase_flat_price: parse_optional_decimal(
                        "vessels",
                        id,
                        "purchase_flat_price",
                        row.get("purchase_flat_price"),
                    )?,
                    supplier: row.get::<Option<String>, _>("supplier").map(SupplierRef::new),
                    purchase_hedges: purchase_hedges.remove(&id).unwrap_or_default(),
                    sales: sales.remove(&id).unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(vessels = vessels.len(), sales = sale_rows.len(), "Loaded vessel snapshot");
        Ok(vessels)
    }
}

fn hedge_from_row(table: &str, row: &SqliteRow) -> Result<Hedge, sqlx::Error> {
    let id: i64 = row.get("id");
    let contracts: i64 = row.get("contracts");
    Ok(Hedge {
        volume: parse_decimal(table, id, "volume", row.get("volume"))?,
        price: parse_decimal(table, id, "price", row.get("price"))?,
        contracts: u32::try_from(contracts).unwrap_or(0),
    })
}

/// Purchase hedges keyed by vessel id, in insertion order.
async fn query_purchase_hedges(
    tx: &mut Transaction<'_, Sqlite>,
    only: Option<i64>,
) -> Result<HashMap<i64, Vec<Hedge>>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT id, vessel_id, volume, price, contracts
        FROM purchase_hedges
        WHERE (? IS NULL OR vessel_id = ?)
        ORDER BY id ASC
        "#,
    )
    .bind(only)
    .bind(only)
    .fetch_all(&mut **tx)
    .await?;

    let mut by_vessel: HashMap<i64, Vec<Hedge>> = HashMap::new();
    for row in &rows {
        by_vessel
            .entry(row.get("vessel_id"))
            .or_default()
            .push(hedge_from_row("purchase_hedges", row)?);
    }
    Ok(by_vessel)
}

/// Sale hedges keyed by sale id, in insertion order.
async fn query_sale_hedges(
    tx: &mut Transaction<'_, Sqlite>,
    only: Option<i64>,
) -> Result<HashMap<i64, Vec<Hedge>>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT sh.id, sh.sale_id, sh.volume, sh.price, sh.contracts
        FROM sale_hedges sh
        JOIN sales s ON s.id = sh.sale_id
        WHERE (? IS NULL OR s.vessel_id = ?)
        ORDER BY sh.id ASC
        "#,
    )
    .bind(only)
    .bind(only)
    .fetch_all(&mut **tx)
    .await?;

    let mut by_sale: HashMap<i64, Vec<Hedge>> = HashMap::new();
    for row in &rows {
        by_sale
            .entry(row.get("sale_id"))
            .or_default()
            .push(hedge_from_row("sale_hedges", row)?);
    }
    Ok(by_sale)
}
