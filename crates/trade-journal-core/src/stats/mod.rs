pub mod equity;
pub mod error_stats;
pub mod global_stats;
pub mod grouped;
pub mod mental;
pub mod timeline;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Trade;

pub(crate) const HUNDRED: Decimal = dec!(100);

/// The scored sub-collection: trades with a recorded R outcome, original
/// order preserved. Every numeric aggregate works on this; only total
/// counts see the full collection.
pub fn scored(trades: &[Trade]) -> Vec<&Trade> {
    trades.iter().filter(|t| t.is_scored()).collect()
}

/// `part / whole` as a percentage, 2 dp. Zero on an empty denominator.
pub(crate) fn percent(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part as u64) / Decimal::from(whole as u64) * HUNDRED).round_dp(2)
}

/// Arithmetic mean, 2 dp. Zero on empty input.
pub(crate) fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    (sum / Decimal::from(values.len() as u64)).round_dp(2)
}

/// Gross winning R over gross losing R, 2 dp. `None` is the "infinite"
/// sentinel: losses are zero while profits are not. Both sides zero
/// collapses to zero rather than erroring.
pub(crate) fn profit_factor(rs: &[Decimal]) -> Option<Decimal> {
    let gross_profit: Decimal = rs.iter().filter(|&&r| r > Decimal::ZERO).sum();
    let gross_loss: Decimal = rs
        .iter()
        .filter(|&&r| r < Decimal::ZERO)
        .map(|r| r.abs())
        .sum();

    if gross_loss > Decimal::ZERO {
        Some((gross_profit / gross_loss).round_dp(2))
    } else if gross_profit > Decimal::ZERO {
        None
    } else {
        Some(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1. Percent falls back to zero instead of dividing by zero
    #[test]
    fn test_percent_empty_denominator() {
        assert_eq!(percent(0, 0), Decimal::ZERO);
        assert_eq!(percent(6, 10), dec!(60.00));
    }

    // 2. Mean of an empty slice is zero
    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), Decimal::ZERO);
        assert_eq!(mean(&[dec!(2), dec!(-1), dec!(1)]), dec!(0.67));
    }

    // 3. Profit factor sentinel cases
    #[test]
    fn test_profit_factor_sentinels() {
        // Winning sum 10, losing sum 0 => infinite sentinel
        assert_eq!(profit_factor(&[dec!(4), dec!(6)]), None);
        // Nothing at all => zero, not an error
        assert_eq!(profit_factor(&[]), Some(Decimal::ZERO));
        // Breakevens only => zero
        assert_eq!(profit_factor(&[Decimal::ZERO]), Some(Decimal::ZERO));
        // Regular ratio
        assert_eq!(
            profit_factor(&[dec!(3), dec!(-1), dec!(-1)]),
            Some(dec!(1.50))
        );
    }
}
