use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::stats::{mean, percent, profit_factor};
use crate::types::{with_metadata, ComputationOutput, R, Trade};
use crate::JournalResult;

/// Per-setup breakdown record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupStats {
    pub setup: String,
    /// All trades carrying this setup, open ones included
    pub total_trades: u32,
    pub winrate: Decimal,
    pub expectancy: R,
    pub total_r: R,
    pub avg_rr: Decimal,
    pub profit_factor: Option<Decimal>,
}

/// Per-session breakdown record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session: String,
    pub total_trades: u32,
    pub winrate: Decimal,
    pub expectancy: R,
    pub total_r: R,
    pub avg_rr: Decimal,
    pub profit_factor: Option<Decimal>,
}

/// Breakdown by setup, best total R first.
pub fn calculate_stats_by_setup(
    trades: &[Trade],
) -> JournalResult<ComputationOutput<Vec<SetupStats>>> {
    let start = Instant::now();

    let rows: Vec<SetupStats> = group_figures(trades, |t| t.setup.as_str())
        .into_iter()
        .map(|(setup, f)| SetupStats {
            setup,
            total_trades: f.total_trades,
            winrate: f.winrate,
            expectancy: f.expectancy,
            total_r: f.total_r,
            avg_rr: f.avg_rr,
            profit_factor: f.profit_factor,
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Statistics by Setup",
        &serde_json::json!({ "trades": trades.len(), "groups": rows.len() }),
        Vec::new(),
        elapsed,
        rows,
    ))
}

/// Breakdown by trading session, best total R first.
pub fn calculate_stats_by_session(
    trades: &[Trade],
) -> JournalResult<ComputationOutput<Vec<SessionStats>>> {
    let start = Instant::now();

    let rows: Vec<SessionStats> = group_figures(trades, |t| t.session.as_str())
        .into_iter()
        .map(|(session, f)| SessionStats {
            session,
            total_trades: f.total_trades,
            winrate: f.winrate,
            expectancy: f.expectancy,
            total_r: f.total_r,
            avg_rr: f.avg_rr,
            profit_factor: f.profit_factor,
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Statistics by Session",
        &serde_json::json!({ "trades": trades.len(), "groups": rows.len() }),
        Vec::new(),
        elapsed,
        rows,
    ))
}

struct GroupFigures {
    total_trades: u32,
    winrate: Decimal,
    expectancy: R,
    total_r: R,
    avg_rr: Decimal,
    profit_factor: Option<Decimal>,
}

/// One-pass accumulation by category value. Every key present in the
/// input gets a group, so group totals always partition the collection;
/// keys whose trades are all still open report zero figures. Ordering is
/// total R descending with key ascending on ties.
fn group_figures<'a, K>(trades: &'a [Trade], key: K) -> Vec<(String, GroupFigures)>
where
    K: Fn(&'a Trade) -> &'a str,
{
    let mut groups: BTreeMap<&str, Vec<&Trade>> = BTreeMap::new();
    for trade in trades {
        groups.entry(key(trade)).or_default().push(trade);
    }

    let mut rows: Vec<(String, GroupFigures)> = groups
        .into_iter()
        .map(|(key, members)| {
            let rs: Vec<Decimal> = members.iter().filter_map(|t| t.result_r).collect();
            let winners = rs.iter().filter(|&&r| r > Decimal::ZERO).count();
            let total_r: Decimal = rs.iter().copied().sum();
            let avg_rr = if rs.is_empty() {
                Decimal::ZERO
            } else {
                (total_r / Decimal::from(rs.len() as u64)).round_dp(2)
            };

            (
                key.to_string(),
                GroupFigures {
                    total_trades: members.len() as u32,
                    winrate: percent(winners, rs.len()),
                    expectancy: mean(&rs),
                    total_r,
                    avg_rr,
                    profit_factor: profit_factor(&rs),
                },
            )
        })
        .collect();

    rows.sort_by(|(key_a, a), (key_b, b)| b.total_r.cmp(&a.total_r).then(key_a.cmp(key_b)));
    rows
}
