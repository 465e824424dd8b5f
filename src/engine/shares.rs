//! Percentage shares for pie and percentage displays.

use super::weighted::safe_div;
use crate::domain::Decimal;
use serde::Serialize;

/// An entry with its value and its share of the total, in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Share<T> {
    #[serde(flatten)]
    pub entry: T,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Attach `100 * value / total` to every entry.
///
/// Every percentage is zero when `total` is zero. Entries are never dropped,
/// zero-valued ones included; filtering is left to the caller.
pub fn with_shares<T, F>(entries: Vec<T>, total: Decimal, value: F) -> Vec<Share<T>>
where
    F: Fn(&T) -> Decimal,
{
    entries
        .into_iter()
        .map(|entry| {
            let v = value(&entry);
            Share {
                percentage: safe_div(v * Decimal::hundred(), total),
                value: v,
                entry,
            }
        })
        .collect()
}

/// Same as [`with_shares`] with the total taken as the sum of all values.
pub fn with_shares_of_sum<T, F>(entries: Vec<T>, value: F) -> Vec<Share<T>>
where
    F: Fn(&T) -> Decimal,
{
    let total: Decimal = entries.iter().map(&value).sum();
    with_shares(entries, total, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    #[test]
    fn test_shares_of_known_total() {
        let entries = vec![("a", d("50")), ("b", d("30")), ("c", d("20"))];
        let shares = with_shares(entries, d("100"), |(_, v)| *v);

        let pct: Vec<Decimal> = shares.iter().map(|s| s.percentage).collect();
        assert_eq!(pct, vec![d("50"), d("30"), d("20")]);
        assert_eq!(pct.iter().sum::<Decimal>(), d("100"));
        assert_eq!(shares[0].entry.0, "a");
    }

    #[test]
    fn test_zero_total_gives_zero_percentages() {
        let entries = vec![("a", d("0")), ("b", d("0"))];
        let shares = with_shares(entries, Decimal::zero(), |(_, v)| *v);
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.percentage.is_zero()));
    }

    #[test]
    fn test_zero_value_entries_are_kept() {
        let entries = vec![("a", d("40")), ("b", d("0"))];
        let shares = with_shares_of_sum(entries, |(_, v)| *v);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].percentage, d("100"));
        assert_eq!(shares[1].percentage, Decimal::zero());
    }

    #[test]
    fn test_shares_of_sum() {
        let entries = vec![d("1"), d("3")];
        let shares = with_shares_of_sum(entries, |v| *v);
        assert_eq!(shares[0].percentage, d("25"));
        assert_eq!(shares[1].percentage, d("75"));
    }

    #[test]
    fn test_share_serializes_flattened() {
        #[derive(Serialize)]
        struct Row {
            counterparty: &'static str,
        }
        let shares = with_shares(vec![Row { counterparty: "ADM" }], d("4"), |_| d("1"));
        let json = serde_json::to_value(&shares[0]).unwrap();
        assert_eq!(json["counterparty"], "ADM");
        assert_eq!(json["percentage"].as_f64(), Some(25.0));
    }
}
