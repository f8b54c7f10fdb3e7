use clap::Args;
use serde_json::Value;

use trade_journal_core::stats::{error_stats, mental};

use crate::input::{self, FilterArgs};

/// Arguments for the error breakdown
#[derive(Args)]
pub struct ErrorsArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_errors(args: ErrorsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = error_stats::calculate_error_stats(&trades)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the mental-state correlation
#[derive(Args)]
pub struct MentalArgs {
    /// Path to JSON file containing the trade collection
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run_mental(args: MentalArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let trades = input::load_trades(&args.input)?;
    let trades = input::apply_filters(trades, &args.filter)?;
    let result = mental::calculate_mental_stats(&trades)?;
    Ok(serde_json::to_value(result)?)
}
