//! Domain primitives: VesselId, SaleId, Counterparty, SupplierRef, DealType.

use serde::{Deserialize, Serialize};

/// Store identifier of a purchased vessel (one purchase lot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VesselId(pub i64);

impl VesselId {
    pub fn new(id: i64) -> Self {
        VesselId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store identifier of a sale allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(pub i64);

impl SaleId {
    pub fn new(id: i64) -> Self {
        SaleId(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Client a sale is allocated to. Also the scope of a restricted viewer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counterparty(pub String);

impl Counterparty {
    pub fn new(name: impl Into<String>) -> Self {
        Counterparty(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Counterparty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplier the cargo was bought from. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierRef(pub String);

impl SupplierRef {
    pub fn new(name: impl Into<String>) -> Self {
        SupplierRef(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a sale is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealType {
    /// Premium over the futures price; the futures leg is hedged separately.
    Premium,
    /// Outright flat price.
    Flat,
}

impl DealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealType::Premium => "premium",
            DealType::Flat => "flat",
        }
    }
}

impl std::fmt::Display for DealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" | "prime" => Ok(DealType::Premium),
            "flat" => Ok(DealType::Flat),
            other => Err(format!("unknown deal type: {}", other)),
        }
    }
}
