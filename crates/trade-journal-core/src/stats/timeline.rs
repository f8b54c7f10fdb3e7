use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::JournalError;
use crate::stats::{self, mean, percent};
use crate::types::{with_metadata, ComputationOutput, Money, R, Trade};
use crate::JournalResult;

pub const DEFAULT_DAILY_WINDOW: u32 = 30;
pub const DEFAULT_WEEKLY_WINDOW: u32 = 12;

const MAX_DAILY_WINDOW: u32 = 365;
const MAX_WEEKLY_WINDOW: u32 = 52;

/// One calendar-day bucket. Empty days are emitted with zero figures so
/// charts show gaps rather than missing points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub total_r: R,
    pub pnl_usd: Money,
    pub winrate: Decimal,
}

/// One Monday-started week bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub total_r: R,
    pub pnl_usd: Money,
    pub winrate: Decimal,
    pub expectancy: R,
}

/// Scored trades bucketed per calendar day over the `days` ending at
/// `as_of` inclusive. The engine never reads the clock; the caller says
/// what "today" is.
pub fn calculate_daily_stats(
    trades: &[Trade],
    days: u32,
    as_of: NaiveDate,
) -> JournalResult<ComputationOutput<Vec<DailyStats>>> {
    let start = Instant::now();

    if days == 0 || days > MAX_DAILY_WINDOW {
        return Err(JournalError::InvalidInput {
            field: "days".into(),
            reason: format!("lookback must be between 1 and {MAX_DAILY_WINDOW} days"),
        });
    }

    let window_start = as_of - Duration::days(i64::from(days) - 1);
    let mut buckets: BTreeMap<NaiveDate, Vec<&Trade>> = (0..days)
        .map(|i| (window_start + Duration::days(i64::from(i)), Vec::new()))
        .collect();

    for trade in stats::scored(trades) {
        if let Some(members) = buckets.get_mut(&trade.date.date()) {
            members.push(trade);
        }
    }

    // BTreeMap iteration gives the buckets oldest first
    let rows: Vec<DailyStats> = buckets
        .into_iter()
        .map(|(date, members)| {
            let figures = BucketFigures::over(&members);
            DailyStats {
                date,
                total_trades: figures.total,
                winning_trades: figures.winners,
                losing_trades: figures.losers,
                total_r: figures.total_r,
                pnl_usd: figures.pnl_usd,
                winrate: figures.winrate,
            }
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Daily Statistics",
        &serde_json::json!({ "days": days, "as_of": as_of, "trades": trades.len() }),
        Vec::new(),
        elapsed,
        rows,
    ))
}

/// Scored trades bucketed per ISO week (Monday start) over the `weeks`
/// ending with the week containing `as_of`.
pub fn calculate_weekly_stats(
    trades: &[Trade],
    weeks: u32,
    as_of: NaiveDate,
) -> JournalResult<ComputationOutput<Vec<WeeklyStats>>> {
    let start = Instant::now();

    if weeks == 0 || weeks > MAX_WEEKLY_WINDOW {
        return Err(JournalError::InvalidInput {
            field: "weeks".into(),
            reason: format!("lookback must be between 1 and {MAX_WEEKLY_WINDOW} weeks"),
        });
    }

    let first_monday = week_start_of(as_of) - Duration::weeks(i64::from(weeks) - 1);
    let mut buckets: BTreeMap<NaiveDate, Vec<&Trade>> = (0..weeks)
        .map(|i| (first_monday + Duration::weeks(i64::from(i)), Vec::new()))
        .collect();

    for trade in stats::scored(trades) {
        if let Some(members) = buckets.get_mut(&week_start_of(trade.date.date())) {
            members.push(trade);
        }
    }

    let rows: Vec<WeeklyStats> = buckets
        .into_iter()
        .map(|(week_start, members)| {
            let figures = BucketFigures::over(&members);
            WeeklyStats {
                week_start,
                week_end: week_start + Duration::days(6),
                total_trades: figures.total,
                winning_trades: figures.winners,
                losing_trades: figures.losers,
                total_r: figures.total_r,
                pnl_usd: figures.pnl_usd,
                winrate: figures.winrate,
                expectancy: figures.expectancy,
            }
        })
        .collect();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Trading Journal — Weekly Statistics",
        &serde_json::json!({ "weeks": weeks, "as_of": as_of, "trades": trades.len() }),
        Vec::new(),
        elapsed,
        rows,
    ))
}

/// Monday of the week containing `date`.
fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

struct BucketFigures {
    total: u32,
    winners: u32,
    losers: u32,
    total_r: R,
    pnl_usd: Money,
    winrate: Decimal,
    expectancy: R,
}

impl BucketFigures {
    fn over(members: &[&Trade]) -> Self {
        let rs: Vec<Decimal> = members.iter().filter_map(|t| t.result_r).collect();
        let winners = rs.iter().filter(|&&r| r > Decimal::ZERO).count();
        let losers = rs.iter().filter(|&&r| r < Decimal::ZERO).count();

        BucketFigures {
            total: members.len() as u32,
            winners: winners as u32,
            losers: losers as u32,
            total_r: rs.iter().copied().sum(),
            pnl_usd: members.iter().filter_map(|t| t.pnl_usd).sum(),
            winrate: percent(winners, rs.len()),
            expectancy: mean(&rs),
        }
    }
}
