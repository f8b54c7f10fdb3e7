use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::stats::{self, mean, percent};
use crate::types::{with_metadata, ComputationOutput, R, Trade};
use crate::JournalResult;

/// Outcome figures for one mental-state rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentalStateStats {
    /// Self-rating, 1-5
    pub mental_state: u8,
    pub total_trades: u32,
    pub winrate: Decimal,
    pub avg_result_r: R,
}

/// Correlation between the trader's self-rated state and outcomes.
/// Ratings nobody used are omitted; unlike the calendar buckets these
/// categories are not chartable as a continuous axis, so the output is
/// sparse.
pub fn calculate_mental_stats(
    trades: &[Trade],
) -> JournalResult<ComputationOutput<Vec<MentalStateStats>>> {
    let start = Instant::now();

    let rated: Vec<&Trade> = stats::scored(trades)
        .into_iter()
        .filter(|t| t.mental_state.is_some())
        .collect();

    let mut rows = Vec::new();
    for state in 1..=5u8 {
        let rs: Vec<Decimal> = rated
            .iter()
            .filter(|t| t.mental_state == Some(state))
            .filter_map(|t| t.result_r)
            .collect();
        if rs.is_empty() {
            continue;
        }

        let winners = rs.iter().filter(|&&r| r > Decimal::ZERO).count();
        rows.push(MentalStateStats {
            mental_state: state,
            total_trades: rs.len() as u32,
            winrate: percent(winners, rs.len()),
            avg_result_r: mean(&rs),
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Mental State Correlation",
        &serde_json::json!({ "trades": trades.len(), "rated": rated.len() }),
        Vec::new(),
        elapsed,
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(id: u64, mental_state: Option<u8>, result_r: Option<Decimal>) -> Trade {
        Trade {
            id,
            date: NaiveDate::from_ymd_opt(2025, 1, 20)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            instrument: "EURUSD".into(),
            session: "London".into(),
            setup: "BOS".into(),
            direction: Direction::Long,
            timeframe: "M15".into(),
            entry: dec!(1.09),
            stop_loss: dec!(1.088),
            take_profit: None,
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r,
            pnl_usd: None,
            duration_min: None,
            respected_plan: true,
            error: false,
            error_type: None,
            mental_state,
            notes: None,
        }
    }

    // 1. Sparse output: unused ratings are omitted, order ascending
    #[test]
    fn test_sparse_ascending() {
        let trades = vec![
            trade(1, Some(5), Some(dec!(2))),
            trade(2, Some(2), Some(dec!(-1))),
            trade(3, Some(5), Some(dec!(1))),
        ];
        let rows = calculate_mental_stats(&trades).unwrap().result;

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mental_state, 2);
        assert_eq!(rows[1].mental_state, 5);
    }

    // 2. Per-rating figures
    #[test]
    fn test_figures() {
        let trades = vec![
            trade(1, Some(4), Some(dec!(2))),
            trade(2, Some(4), Some(dec!(-1))),
        ];
        let rows = calculate_mental_stats(&trades).unwrap().result;

        assert_eq!(rows[0].total_trades, 2);
        assert_eq!(rows[0].winrate, dec!(50.00));
        assert_eq!(rows[0].avg_result_r, dec!(0.50));
    }

    // 3. Unrated and open trades are excluded
    #[test]
    fn test_exclusions() {
        let trades = vec![
            trade(1, None, Some(dec!(2))),
            trade(2, Some(3), None),
        ];
        let rows = calculate_mental_stats(&trades).unwrap().result;
        assert!(rows.is_empty());
    }
}
