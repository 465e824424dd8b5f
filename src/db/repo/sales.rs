//! Sale and sale-hedge writes.

use crate::domain::{Hedge, SaleId, VesselId};
use tracing::info;

use super::{now_ms, NewSale, Repository};

impl Repository {
    /// Allocate part of a vessel's cargo to a counterparty.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including when the vessel does not exist.
    pub async fn insert_sale(
        &self,
        vessel_id: VesselId,
        sale: &NewSale,
    ) -> Result<SaleId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO sales (
                vessel_id, counterparty, deal_type, volume, sale_premium,
                sale_flat_price, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vessel_id.as_i64())
        .bind(sale.counterparty.as_str())
        .bind(sale.deal_type.as_str())
        .bind(sale.volume.to_canonical_string())
        .bind(sale.sale_premium.map(|d| d.to_canonical_string()))
        .bind(sale.sale_flat_price.map(|d| d.to_canonical_string()))
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        let id = SaleId::new(result.last_insert_rowid());
        info!(
            vessel_id = %vessel_id,
            sale_id = id.as_i64(),
            counterparty = %sale.counterparty,
            deal_type = %sale.deal_type,
            "Sale recorded"
        );
        Ok(id)
    }

    /// Record a futures hedge against a sale.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including when the sale does not exist.
    pub async fn insert_sale_hedge(&self, sale_id: SaleId, hedge: &Hedge) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO sale_hedges (sale_id, volume, price, contracts, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale_id.as_i64())
        .bind(hedge.volume.to_canonical_string())
        .bind(hedge.price.to_canonical_string())
        .bind(i64::from(hedge.contracts))
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
