use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;

use trade_journal_core::stats::timeline::{
    self, DEFAULT_DAILY_WINDOW, DEFAULT_WEEKLY_WINDOW,
};

use crate::input::{self, FilterArgs};

/// Arguments for daily statistics
#[derive(Args)]
pub struct DailyArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    /// Lookback window in days
    #[arg(long, default_value_t = DEFAULT_DAILY_WINDOW)]
    pub days: u32,

    /// Reference date for the window (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_daily(args: DailyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let as_of = args.as_of.unwrap_or_else(today);
    let result = timeline::calculate_daily_stats(&trades, args.days, as_of)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for weekly statistics
#[derive(Args)]
pub struct WeeklyArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    /// Lookback window in weeks
    #[arg(long, default_value_t = DEFAULT_WEEKLY_WINDOW)]
    pub weeks: u32,

    /// Reference date for the window (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_weekly(args: WeeklyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let as_of = args.as_of.unwrap_or_else(today);
    let result = timeline::calculate_weekly_stats(&trades, args.weeks, as_of)?;
    Ok(serde_json::to_value(result)?)
}

/// The engine never reads the clock; the reference date is resolved here.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
