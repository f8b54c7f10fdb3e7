use clap::Args;
use serde_json::Value;

use trade_journal_core::stats::grouped;

use crate::input::{self, FilterArgs};

/// Arguments for the per-setup breakdown
#[derive(Args)]
pub struct BySetupArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_by_setup(args: BySetupArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = grouped::calculate_stats_by_setup(&trades)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the per-session breakdown
#[derive(Args)]
pub struct BySessionArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_by_session(args: BySessionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = grouped::calculate_stats_by_session(&trades)?;
    Ok(serde_json::to_value(result)?)
}
