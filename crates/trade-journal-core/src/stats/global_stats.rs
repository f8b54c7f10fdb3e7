use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::stats::{self, equity, mean, percent, profit_factor};
use crate::types::{with_metadata, ComputationOutput, Money, R, Trade};
use crate::JournalResult;

/// Scalar summary over the whole filtered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Count of every input trade, open trades included
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub breakeven_trades: u32,
    /// Winners over scored trades, as a percentage
    pub winrate: Decimal,
    pub avg_win_r: R,
    pub avg_loss_r: R,
    /// Mean R outcome per scored trade
    pub expectancy: R,
    /// None is the "infinite" sentinel: no losses on the book yet
    pub profit_factor: Option<Decimal>,
    pub total_r: R,
    pub total_pnl_usd: Money,
    pub max_drawdown_r: R,
    pub max_drawdown_pct: Decimal,
    pub avg_rr_expected: Decimal,
    pub avg_rr_actual: Decimal,
    /// Plan-respecting trades over all input trades, as a percentage
    pub discipline_rate: Decimal,
    pub avg_duration_min: Decimal,
}

/// Compute the dashboard's headline figures. An empty collection yields
/// the all-zero record; no division here can raise.
pub fn calculate_global_stats(trades: &[Trade]) -> JournalResult<ComputationOutput<GlobalStats>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    let scored = stats::scored(trades);
    let rs: Vec<Decimal> = scored.iter().filter_map(|t| t.result_r).collect();

    let wins: Vec<Decimal> = rs.iter().copied().filter(|&r| r > Decimal::ZERO).collect();
    let losses: Vec<Decimal> = rs.iter().copied().filter(|&r| r < Decimal::ZERO).collect();
    let breakeven_count = rs.iter().filter(|&&r| r == Decimal::ZERO).count();

    let total_r: Decimal = rs.iter().copied().sum();
    let total_pnl_usd: Decimal = scored.iter().filter_map(|t| t.pnl_usd).sum();

    let avg_rr_actual = if rs.is_empty() {
        Decimal::ZERO
    } else {
        (total_r / Decimal::from(rs.len() as u64)).round_dp(2)
    };
    let rr_expected: Vec<Decimal> = scored.iter().map(|t| t.rr_expected).collect();

    let durations: Vec<Decimal> = scored
        .iter()
        .filter_map(|t| t.duration_min)
        .map(Decimal::from)
        .collect();
    let avg_duration_min = if durations.is_empty() {
        Decimal::ZERO
    } else {
        (durations.iter().copied().sum::<Decimal>() / Decimal::from(durations.len() as u64))
            .round_dp(1)
    };

    // The one rate measured over the full collection, open trades included
    let respected = trades.iter().filter(|t| t.respected_plan).count();

    let (max_drawdown_r, max_drawdown_pct) = equity::max_drawdown(&scored);

    let result = GlobalStats {
        total_trades: trades.len() as u32,
        winning_trades: wins.len() as u32,
        losing_trades: losses.len() as u32,
        breakeven_trades: breakeven_count as u32,
        winrate: percent(wins.len(), rs.len()),
        avg_win_r: mean(&wins),
        avg_loss_r: mean(&losses),
        expectancy: mean(&rs),
        profit_factor: profit_factor(&rs),
        total_r,
        total_pnl_usd,
        max_drawdown_r,
        max_drawdown_pct,
        avg_rr_expected: mean(&rr_expected),
        avg_rr_actual,
        discipline_rate: percent(respected, trades.len()),
        avg_duration_min,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Global Performance Summary",
        &serde_json::json!({
            "trades": trades.len(),
            "scored": rs.len(),
        }),
        warnings,
        elapsed,
        result,
    ))
}
