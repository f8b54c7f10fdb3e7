use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::stats::{self, HUNDRED};
use crate::types::{with_metadata, ComputationOutput, Money, R, Trade};
use crate::JournalResult;

/// One point per scored trade, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDateTime,
    pub cumulative_r: R,
    pub cumulative_pnl: Money,
    /// 1-based position along the curve
    pub trade_count: u32,
}

/// Running cumulative R and P&L after each scored trade. Pure
/// recomputation: the curve length always equals the scored count and
/// the same input yields the same sequence.
pub fn calculate_equity_curve(
    trades: &[Trade],
) -> JournalResult<ComputationOutput<Vec<EquityPoint>>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let ordered = chronological(&stats::scored(trades));

    let mut cumulative_r = Decimal::ZERO;
    let mut cumulative_pnl = Decimal::ZERO;
    let mut points = Vec::with_capacity(ordered.len());

    for (i, trade) in ordered.iter().enumerate() {
        cumulative_r += trade.result_r.unwrap_or_default();
        cumulative_pnl += trade.pnl_usd.unwrap_or_default();
        points.push(EquityPoint {
            date: trade.date,
            cumulative_r,
            cumulative_pnl,
            trade_count: (i + 1) as u32,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Equity Curve",
        &serde_json::json!({
            "trades": trades.len(),
            "scored": ordered.len(),
        }),
        warnings,
        elapsed,
        points,
    ))
}

/// Maximum peak-to-trough decline of cumulative R, plus the decline as a
/// percentage of the peak. Peak starts at zero, so the result is never
/// negative; a curve that only rises reports zero.
pub(crate) fn max_drawdown(scored: &[&Trade]) -> (Decimal, Decimal) {
    let ordered = chronological(scored);

    let mut cumulative = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut max_dd = Decimal::ZERO;

    for trade in ordered {
        cumulative += trade.result_r.unwrap_or_default();
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = peak - cumulative;
        if drawdown > max_dd {
            max_dd = drawdown;
        }
    }

    let max_dd_pct = if peak > Decimal::ZERO {
        (max_dd / peak * HUNDRED).round_dp(2)
    } else {
        Decimal::ZERO
    };

    (max_dd, max_dd_pct)
}

/// Stable chronological sort; same-timestamp trades keep insertion order.
fn chronological<'a>(scored: &[&'a Trade]) -> Vec<&'a Trade> {
    let mut ordered = scored.to_vec();
    ordered.sort_by_key(|t| t.date);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(id: u64, day: u32, result_r: Decimal) -> Trade {
        Trade {
            id,
            date: NaiveDate::from_ymd_opt(2025, 6, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            instrument: "XAUUSD".into(),
            session: "London".into(),
            setup: "CRT".into(),
            direction: Direction::Long,
            timeframe: "M15".into(),
            entry: dec!(2400),
            stop_loss: dec!(2395),
            take_profit: None,
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r: Some(result_r),
            pnl_usd: Some(result_r * dec!(100)),
            duration_min: Some(30),
            respected_plan: true,
            error: false,
            error_type: None,
            mental_state: None,
            notes: None,
        }
    }

    // 1. Curve accumulates R and P&L in date order
    #[test]
    fn test_curve_accumulation() {
        let trades = vec![
            trade(1, 2, dec!(2)),
            trade(2, 3, dec!(-1)),
            trade(3, 4, dec!(1)),
        ];
        let curve = calculate_equity_curve(&trades).unwrap().result;

        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].cumulative_r, dec!(2));
        assert_eq!(curve[1].cumulative_r, dec!(1));
        assert_eq!(curve[2].cumulative_r, dec!(2));
        assert_eq!(curve[2].cumulative_pnl, dec!(200));
        assert_eq!(curve[2].trade_count, 3);
    }

    // 2. Unsorted input is walked chronologically
    #[test]
    fn test_curve_sorts_by_date() {
        let trades = vec![
            trade(1, 9, dec!(-1)),
            trade(2, 3, dec!(2)),
            trade(3, 6, dec!(1)),
        ];
        let curve = calculate_equity_curve(&trades).unwrap().result;

        assert_eq!(curve[0].cumulative_r, dec!(2));
        assert_eq!(curve[1].cumulative_r, dec!(3));
        assert_eq!(curve[2].cumulative_r, dec!(2));
    }

    // 3. Open trades never appear on the curve
    #[test]
    fn test_curve_skips_unscored() {
        let mut open = trade(4, 5, Decimal::ZERO);
        open.result_r = None;
        open.pnl_usd = None;
        let trades = vec![trade(1, 2, dec!(1)), open];

        let curve = calculate_equity_curve(&trades).unwrap().result;
        assert_eq!(curve.len(), 1);
    }

    // 4. Worked drawdown example: [+2, -1, +1, -3, +2] => max dd 3
    #[test]
    fn test_max_drawdown_walk() {
        let trades = vec![
            trade(1, 2, dec!(2)),
            trade(2, 3, dec!(-1)),
            trade(3, 4, dec!(1)),
            trade(4, 5, dec!(-3)),
            trade(5, 6, dec!(2)),
        ];
        let scored = crate::stats::scored(&trades);
        let (dd_r, dd_pct) = max_drawdown(&scored);

        assert_eq!(dd_r, dec!(3));
        // Peak 2, trough -1 => 3 / 2 = 150%
        assert_eq!(dd_pct, dec!(150.00));
    }

    // 5. A curve that never retraces has zero drawdown
    #[test]
    fn test_drawdown_monotonic_curve() {
        let trades = vec![trade(1, 2, dec!(1)), trade(2, 3, dec!(2))];
        let scored = crate::stats::scored(&trades);
        let (dd_r, dd_pct) = max_drawdown(&scored);

        assert_eq!(dd_r, Decimal::ZERO);
        assert_eq!(dd_pct, Decimal::ZERO);
    }

    // 6. All-losing curve never rises above the starting peak of zero
    #[test]
    fn test_drawdown_all_losers() {
        let trades = vec![trade(1, 2, dec!(-1)), trade(2, 3, dec!(-2))];
        let scored = crate::stats::scored(&trades);
        let (dd_r, dd_pct) = max_drawdown(&scored);

        assert_eq!(dd_r, dec!(3));
        // Peak never exceeded zero, so the percentage is undefined => 0
        assert_eq!(dd_pct, Decimal::ZERO);
    }

    // 7. Same-day trades keep insertion order
    #[test]
    fn test_stable_tie_break() {
        let trades = vec![trade(1, 2, dec!(2)), trade(2, 2, dec!(-1))];
        let curve = calculate_equity_curve(&trades).unwrap().result;

        assert_eq!(curve[0].cumulative_r, dec!(2));
        assert_eq!(curve[1].cumulative_r, dec!(1));
    }

    // 8. Recomputation is deterministic
    #[test]
    fn test_idempotent() {
        let trades = vec![
            trade(1, 2, dec!(2)),
            trade(2, 3, dec!(-1)),
            trade(3, 4, dec!(1)),
        ];
        let a = calculate_equity_curve(&trades).unwrap().result;
        let b = calculate_equity_curve(&trades).unwrap().result;
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
