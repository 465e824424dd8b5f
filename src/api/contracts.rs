use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{check_volume, Decimal, Product};
use crate::engine::{contract_size, contracts_to_volume, overcoverage, volume_to_contracts};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsQuery {
    pub product: String,
    pub volume: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsResponse {
    pub product: Product,
    pub volume: Decimal,
    pub contract_size: Decimal,
    pub contracts: Decimal,
    pub covered_volume: Decimal,
    pub overcoverage: Decimal,
}

/// Whole contracts needed to hedge a tonnage, and the excess they cover.
pub async fn get_contracts(
    Query(params): Query<ContractsQuery>,
) -> Result<Json<ContractsResponse>, AppError> {
    let product = Product::from_str(&params.product)?;
    let volume = Decimal::from_str_canonical(&params.volume)
        .map_err(|_| AppError::BadRequest("Invalid volume".to_string()))?;
    check_volume("volume", volume).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let contracts = volume_to_contracts(volume, product);

    Ok(Json(ContractsResponse {
        product,
        volume,
        contract_size: contract_size(product),
        contracts,
        covered_volume: contracts_to_volume(contracts, product),
        overcoverage: overcoverage(volume, contracts, product),
    }))
}
