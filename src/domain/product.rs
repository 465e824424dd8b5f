//! Traded product identity.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A product carried by a vessel. Fixes the price-unit conversion factor and
/// the futures contract size (see `engine::reference`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    /// Quoted in cents/bushel on the exchange.
    Corn,
    /// Quoted in $/short ton on the exchange.
    SoybeanMeal,
    Wheat,
    Barley,
}

impl Product {
    pub const ALL: [Product; 4] = [
        Product::Corn,
        Product::SoybeanMeal,
        Product::Wheat,
        Product::Barley,
    ];

    /// Canonical code as stored and serialized.
    pub fn code(&self) -> &'static str {
        match self {
            Product::Corn => "corn",
            Product::SoybeanMeal => "soybean_meal",
            Product::Wheat => "wheat",
            Product::Barley => "barley",
        }
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Product {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "corn" | "mais" => Ok(Product::Corn),
            "soybean_meal" | "soymeal" | "tourteau_soja" => Ok(Product::SoybeanMeal),
            "wheat" | "ble" => Ok(Product::Wheat),
            "barley" | "orge" => Ok(Product::Barley),
            _ => Err(EngineError::UnknownProduct(s.to_string())),
        }
    }
}
