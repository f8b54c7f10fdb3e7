use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::stats::{self, mean, percent};
use crate::types::{with_metadata, ComputationOutput, R, Trade};
use crate::JournalResult;

/// One record per error label among flagged, scored trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBreakdown {
    pub error_type: String,
    pub count: u32,
    /// Share of all errored trades, as a percentage
    pub percentage: Decimal,
    /// Mean R of the group, reported as-is (usually negative)
    pub avg_loss_r: R,
}

/// Which mistakes happen, how often, and what they cost on average.
/// Trades without the error flag never appear here, whatever their
/// `error_type` field says. No errors at all yields an empty sequence.
pub fn calculate_error_stats(
    trades: &[Trade],
) -> JournalResult<ComputationOutput<Vec<ErrorBreakdown>>> {
    let start = Instant::now();

    let mut groups: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for trade in stats::scored(trades) {
        if let (Some(label), Some(r)) = (trade.error_label(), trade.result_r) {
            groups.entry(label).or_default().push(r);
        }
    }

    let errored_total: usize = groups.values().map(Vec::len).sum();

    let mut rows: Vec<ErrorBreakdown> = groups
        .into_iter()
        .map(|(label, rs)| ErrorBreakdown {
            error_type: label.to_string(),
            count: rs.len() as u32,
            percentage: percent(rs.len(), errored_total),
            avg_loss_r: mean(&rs),
        })
        .collect();

    // Most frequent mistake first
    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.error_type.cmp(&b.error_type)));

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Error Breakdown",
        &serde_json::json!({ "trades": trades.len(), "errored": errored_total }),
        Vec::new(),
        elapsed,
        rows,
    ))
}
