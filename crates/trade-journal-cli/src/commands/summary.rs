use clap::Args;
use serde_json::Value;

use trade_journal_core::stats::{equity, global_stats};

use crate::input::{self, FilterArgs};

/// Arguments for the global summary
#[derive(Args)]
pub struct GlobalArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_global(args: GlobalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = global_stats::calculate_global_stats(&trades)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the equity curve
#[derive(Args)]
pub struct EquityCurveArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_equity_curve(args: EquityCurveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = equity::calculate_equity_curve(&trades)?;
    Ok(serde_json::to_value(result)?)
}
