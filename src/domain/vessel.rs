//! Validated vessel and sale forms consumed by the P&L engine.

use crate::domain::{
    Counterparty, DealType, Decimal, Hedge, Product, SaleId, SaleRecord, SupplierRef,
    VesselId, VesselRecord,
};
use crate::error::EngineError;
use std::str::FromStr;
use tracing::warn;

/// Largest magnitude accepted for any volume, price or premium.
///
/// Keeps every product and running sum in the engine far inside the range of
/// the underlying 96-bit decimal.
pub const MAX_FIGURE: i64 = 1_000_000_000;

/// Accept a price or premium, which may be negative, if within [`MAX_FIGURE`].
pub fn check_price(field: &'static str, value: Decimal) -> Result<Decimal, EngineError> {
    if value.abs() > Decimal::from(MAX_FIGURE) {
        return Err(EngineError::OutOfRange { field, value });
    }
    Ok(value)
}

/// Accept a volume in `0..=MAX_FIGURE`.
pub fn check_volume(field: &'static str, value: Decimal) -> Result<Decimal, EngineError> {
    if value.is_negative() {
        return Err(EngineError::OutOfRange { field, value });
    }
    check_price(field, value)
}

fn check_hedges(field: &'static str, hedges: &[Hedge]) -> Result<(), EngineError> {
    for hedge in hedges {
        check_volume(field, hedge.volume)?;
        check_price(field, hedge.price)?;
    }
    Ok(())
}

/// How the purchase side of a vessel was priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasePricing {
    /// Premium over futures, in the product's native quote.
    Premium(Decimal),
    /// Outright flat price.
    Flat(Decimal),
    /// Not priced yet.
    Unpriced,
}

impl PurchasePricing {
    /// Purchase premium used for premium P&L. Zero unless premium-priced.
    pub fn premium(&self) -> Decimal {
        match self {
            PurchasePricing::Premium(p) => *p,
            PurchasePricing::Flat(_) | PurchasePricing::Unpriced => Decimal::zero(),
        }
    }

    pub fn flat_price(&self) -> Option<Decimal> {
        match self {
            PurchasePricing::Flat(price) => Some(*price),
            _ => None,
        }
    }
}

/// How a sale was priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalePricing {
    Premium(Decimal),
    Flat(Option<Decimal>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub id: SaleId,
    pub counterparty: Counterparty,
    pub volume: Decimal,
    pub pricing: SalePricing,
    pub hedges: Vec<Hedge>,
}

impl Sale {
    pub fn deal_type(&self) -> DealType {
        match self.pricing {
            SalePricing::Premium(_) => DealType::Premium,
            SalePricing::Flat(_) => DealType::Flat,
        }
    }

    /// Sale premium when premium-priced.
    pub fn premium(&self) -> Option<Decimal> {
        match self.pricing {
            SalePricing::Premium(p) => Some(p),
            SalePricing::Flat(_) => None,
        }
    }
}

impl TryFrom<&SaleRecord> for Sale {
    type Error = EngineError;

    fn try_from(record: &SaleRecord) -> Result<Self, EngineError> {
        check_volume("sale volume", record.volume)?;
        if let Some(premium) = record.sale_premium {
            check_price("sale premium", premium)?;
        }
        if let Some(flat) = record.sale_flat_price {
            check_price("sale flat price", flat)?;
        }
        check_hedges("sale hedge", &record.hedges)?;

        let pricing = match record.deal_type {
            DealType::Premium => {
                SalePricing::Premium(record.sale_premium.unwrap_or_else(Decimal::zero))
            }
            DealType::Flat => SalePricing::Flat(record.sale_flat_price),
        };

        Ok(Sale {
            id: record.id,
            counterparty: record.counterparty.clone(),
            volume: record.volume,
            pricing,
            hedges: record.hedges.clone(),
        })
    }
}

/// A purchased cargo with a resolved product and pricing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vessel {
    pub id: VesselId,
    pub name: String,
    pub product: Product,
    pub volume: Decimal,
    pub pricing: PurchasePricing,
    pub supplier: Option<SupplierRef>,
    pub purchase_hedges: Vec<Hedge>,
    pub sales: Vec<Sale>,
}

impl Vessel {
    /// Drop every sale not allocated to `counterparty`. Purchase-side data is kept.
    pub fn retain_sales_for(&mut self, counterparty: &Counterparty) {
        self.sales.retain(|sale| &sale.counterparty == counterparty);
    }

    /// Sale-side hedges flattened across all sales.
    pub fn sale_hedges(&self) -> impl Iterator<Item = &Hedge> {
        self.sales.iter().flat_map(|sale| sale.hedges.iter())
    }
}

impl VesselRecord {
    /// Resolve the product code and pricing variants.
    ///
    /// # Errors
    /// Returns `EngineError::UnknownProduct` if the product code is not in the
    /// reference tables, and `EngineError::OutOfRange` for a negative volume or
    /// a figure beyond [`MAX_FIGURE`].
    pub fn validate(&self) -> Result<Vessel, EngineError> {
        let product = Product::from_str(&self.product)?;
        check_volume("vessel volume", self.volume)?;
        if let Some(premium) = self.purchase_premium {
            check_price("purchase premium", premium)?;
        }
        if let Some(flat) = self.purchase_flat_price {
            check_price("purchase flat price", flat)?;
        }
        check_hedges("purchase hedge", &self.purchase_hedges)?;

        let pricing = match (self.purchase_premium, self.purchase_flat_price) {
            (Some(premium), flat) => {
                if flat.is_some() {
                    warn!(
                        vessel_id = %self.id,
                        "Vessel carries both a purchase premium and a flat price, using the premium"
                    );
                }
                PurchasePricing::Premium(premium)
            }
            (None, Some(flat)) => PurchasePricing::Flat(flat),
            (None, None) => PurchasePricing::Unpriced,
        };

        Ok(Vessel {
            id: self.id,
            name: self.name.clone(),
            product,
            volume: self.volume,
            pricing,
            supplier: self.supplier.clone(),
            purchase_hedges: self.purchase_hedges.clone(),
            sales: self
                .sales
                .iter()
                .map(Sale::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn record(product: &str) -> VesselRecord {
        VesselRecord {
            id: VesselId::new(1),
            name: "MV Test".to_string(),
            product: product.to_string(),
            volume: d("1000"),
            purchase_premium: None,
            purchase_flat_price: None,
            supplier: None,
            purchase_hedges: vec![],
            sales: vec![],
        }
    }

    fn sale(counterparty: &str, deal_type: DealType) -> SaleRecord {
        SaleRecord {
            id: SaleId::new(1),
            counterparty: Counterparty::new(counterparty),
            deal_type,
            volume: d("100"),
            sale_premium: None,
            sale_flat_price: Some(d("210")),
            hedges: vec![],
        }
    }

    #[test]
    fn test_validate_resolves_pricing_variants() {
        let mut r = record("corn");
        assert_eq!(r.validate().unwrap().pricing, PurchasePricing::Unpriced);

        r.purchase_flat_price = Some(d("205"));
        assert_eq!(r.validate().unwrap().pricing, PurchasePricing::Flat(d("205")));

        r.purchase_premium = Some(d("30"));
        assert_eq!(
            r.validate().unwrap().pricing,
            PurchasePricing::Premium(d("30"))
        );
    }

    #[test]
    fn test_non_premium_purchase_contributes_zero_premium() {
        assert_eq!(PurchasePricing::Flat(d("205")).premium(), Decimal::zero());
        assert_eq!(PurchasePricing::Unpriced.premium(), Decimal::zero());
        assert_eq!(PurchasePricing::Premium(d("12")).premium(), d("12"));
    }

    #[test]
    fn test_validate_unknown_product() {
        let err = record("sunflower").validate().unwrap_err();
        assert_eq!(err, EngineError::UnknownProduct("sunflower".to_string()));
    }

    #[test]
    fn test_premium_sale_without_premium_resolves_to_zero() {
        let s = Sale::try_from(&sale("ADM", DealType::Premium)).unwrap();
        assert_eq!(s.pricing, SalePricing::Premium(Decimal::zero()));
        assert_eq!(s.deal_type(), DealType::Premium);

        let f = Sale::try_from(&sale("ADM", DealType::Flat)).unwrap();
        assert_eq!(f.pricing, SalePricing::Flat(Some(d("210"))));
        assert!(f.premium().is_none());
    }

    #[test]
    fn test_retain_sales_for_counterparty() {
        let mut r = record("wheat");
        r.sales = vec![sale("ADM", DealType::Flat), sale("Bunge", DealType::Flat)];
        let mut vessel = r.validate().unwrap();

        vessel.retain_sales_for(&Counterparty::new("Bunge"));
        assert_eq!(vessel.sales.len(), 1);
        assert_eq!(vessel.sales[0].counterparty.as_str(), "Bunge");
        assert_eq!(vessel.volume, d("1000"));
    }

    #[test]
    fn test_validate_rejects_negative_volumes() {
        let mut r = record("corn");
        r.volume = d("-1");
        assert_eq!(
            r.validate().unwrap_err(),
            EngineError::OutOfRange {
                field: "vessel volume",
                value: d("-1")
            }
        );

        let mut r = record("corn");
        let mut s = sale("ADM", DealType::Flat);
        s.hedges = vec![Hedge::new(d("-10"), d("450"), 0)];
        r.sales = vec![s];
        assert!(matches!(
            r.validate(),
            Err(EngineError::OutOfRange { field: "sale hedge", .. })
        ));
    }

    #[test]
    fn test_validate_bounds_figure_magnitude() {
        let mut r = record("wheat");
        r.purchase_premium = Some(d("-25"));
        r.purchase_hedges = vec![Hedge::new(d("1000000000"), d("220"), 0)];
        assert!(r.validate().is_ok());

        r.purchase_hedges = vec![Hedge::new(d("1000"), d("1000000000000000"), 0)];
        assert!(matches!(
            r.validate(),
            Err(EngineError::OutOfRange { field: "purchase hedge", .. })
        ));

        let mut r = record("wheat");
        r.volume = d("79228162514264337593543950335");
        assert!(r.validate().is_err());
    }
}
