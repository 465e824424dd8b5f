//! Vessel and purchase-hedge writes.

use crate::domain::{Hedge, VesselId};
use tracing::info;

use super::{now_ms, NewVessel, Repository};

impl Repository {
    /// Record a vessel purchase.
    ///
    /// The product code is stored as given; it is only checked against the
    /// reference tables when P&L is computed.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub async fn insert_vessel(&self, vessel: &NewVessel) -> Result<VesselId, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO vessels (
                name, product, volume, purchase_premium, purchase_flat_price,
                supplier, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(vessel.name.as_str())
        .bind(vessel.product.as_str())
        .bind(vessel.volume.to_canonical_string())
        .bind(vessel.purchase_premium.map(|d| d.to_canonical_string()))
        .bind(vessel.purchase_flat_price.map(|d| d.to_canonical_string()))
        .bind(vessel.supplier.as_ref().map(|s| s.as_str()))
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        let id = VesselId::new(result.last_insert_rowid());
        info!(vessel_id = %id, name = %vessel.name, product = %vessel.product, "Vessel recorded");
        Ok(id)
    }

    pub async fn count_vessels(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vessels")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Record a purchase-side futures hedge.
    ///
    /// # Errors
    /// Returns an error if the insert fails, including when the vessel does not exist.
    pub async fn insert_purchase_hedge(
        &self,
        vessel_id: VesselId,
        hedge: &Hedge,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchase_hedges (vessel_id, volume, price, contracts, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(vessel_id.as_i64())
        .bind(hedge.volume.to_canonical_string())
        .bind(hedge.price.to_canonical_string())
        .bind(i64::from(hedge.contracts))
        .bind(now_ms())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
