//! Conversion and futures-contract reference tables.
//!
//! Both tables are pure functions of [`Product`]; nothing else may influence them.

use crate::domain::{Decimal, Product};
use crate::error::EngineError;
use std::str::FromStr;

/// Multiplicative factor from the product's native exchange quote to $/tonne.
///
/// Corn is quoted in cents/bushel, soybean meal in $/short ton; wheat and barley
/// are already recorded in $/tonne.
pub fn conversion_factor(product: Product) -> Decimal {
    match product {
        Product::Corn => Decimal::from_scaled(3937, 4),
        Product::SoybeanMeal => Decimal::from_scaled(9072, 4),
        Product::Wheat | Product::Barley => Decimal::from(1),
    }
}

/// Standard futures contract size in tonnes. Zero when no standard contract
/// is traded for the product.
pub fn contract_size(product: Product) -> Decimal {
    match product {
        Product::Corn => Decimal::from(127),
        Product::SoybeanMeal => Decimal::from_scaled(9010, 2),
        Product::Wheat | Product::Barley => Decimal::zero(),
    }
}

/// Look up the conversion factor from a raw product code.
pub fn conversion_factor_for_code(code: &str) -> Result<Decimal, EngineError> {
    Product::from_str(code).map(conversion_factor)
}

/// Look up the contract size from a raw product code.
pub fn contract_size_for_code(code: &str) -> Result<Decimal, EngineError> {
    Product::from_str(code).map(contract_size)
}

/// Whole contracts needed to cover `volume` tonnes.
///
/// Rounds up: a hedge never covers a fractional contract, so the position ends
/// up fully covered or over-covered, never under-covered. Zero when the product
/// has no standard contract.
pub fn volume_to_contracts(volume: Decimal, product: Product) -> Decimal {
    let size = contract_size(product);
    if size.is_zero() || !volume.is_positive() {
        return Decimal::zero();
    }
    (volume / size).ceil()
}

/// Tonnes covered by `contracts` standard contracts.
pub fn contracts_to_volume(contracts: Decimal, product: Product) -> Decimal {
    contracts * contract_size(product)
}

/// Excess tonnes created by rounding `original_volume` up to whole contracts.
pub fn overcoverage(original_volume: Decimal, contracts: Decimal, product: Product) -> Decimal {
    (contracts_to_volume(contracts, product) - original_volume).max(Decimal::zero())
}
