//! Zero-guarded weighted reduction shared by every average and share in the engine.

use crate::domain::Decimal;

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::zero()
    } else {
        numerator / denominator
    }
}

/// Running `Σ(value * weight)` and `Σ(weight)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeightedSum {
    weighted_total: Decimal,
    total_weight: Decimal,
}

impl WeightedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values and weights come from validated records, so both are bounded by
    /// [`MAX_FIGURE`](crate::domain::MAX_FIGURE) and the products cannot overflow.
    pub fn add(&mut self, value: Decimal, weight: Decimal) {
        self.weighted_total += value * weight;
        self.total_weight += weight;
    }

    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    /// Weighted mean, zero when no weight has been accumulated.
    pub fn average(&self) -> Decimal {
        safe_div(self.weighted_total, self.total_weight)
    }
}

impl FromIterator<(Decimal, Decimal)> for WeightedSum {
    /// Collect `(value, weight)` pairs.
    fn from_iter<I: IntoIterator<Item = (Decimal, Decimal)>>(iter: I) -> Self {
        let mut sum = WeightedSum::new();
        for (value, weight) in iter {
            sum.add(value, weight);
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_safe_div_guards_zero() {
        assert_eq!(safe_div(d("10"), Decimal::zero()), Decimal::zero());
        assert_eq!(safe_div(d("10"), d("4")), d("2.5"));
    }

    #[test]
    fn test_weighted_average() {
        let sum: WeightedSum = vec![(d("10"), d("100")), (d("20"), d("300"))]
            .into_iter()
            .collect();
        assert_eq!(sum.total_weight(), d("400"));
        assert_eq!(sum.average(), d("17.5"));
    }

    #[test]
    fn test_single_entry_average_is_exact() {
        let sum: WeightedSum = std::iter::once((d("12.345"), d("777"))).collect();
        assert_eq!(sum.average(), d("12.345"));
    }

    #[test]
    fn test_empty_and_zero_weight_average_is_zero() {
        assert_eq!(WeightedSum::new().average(), Decimal::zero());

        let zero_weight: WeightedSum = vec![(d("450"), Decimal::zero())].into_iter().collect();
        assert_eq!(zero_weight.average(), Decimal::zero());
        assert!(zero_weight.total_weight().is_zero());
    }
}
