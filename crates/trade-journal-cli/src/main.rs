mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::behavior::{ErrorsArgs, MentalArgs};
use commands::grouped::{BySessionArgs, BySetupArgs};
use commands::summary::{EquityCurveArgs, GlobalArgs};
use commands::timeline::{DailyArgs, WeeklyArgs};

/// Trading journal statistics
#[derive(Parser)]
#[command(
    name = "tj",
    version,
    about = "Trading journal statistics",
    long_about = "Derives performance statistics from a trading journal: win rate, \
                  expectancy, profit factor, drawdown, discipline rate, grouped and \
                  time-bucketed breakdowns, and the equity curve. Reads the trade \
                  collection from a JSON file or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Global performance summary
    Global(GlobalArgs),
    /// Statistics grouped by setup
    BySetup(BySetupArgs),
    /// Statistics grouped by trading session
    BySession(BySessionArgs),
    /// Daily statistics over a lookback window
    Daily(DailyArgs),
    /// Weekly statistics over a lookback window
    Weekly(WeeklyArgs),
    /// Breakdown of trading errors
    Errors(ErrorsArgs),
    /// Mental state / outcome correlation
    Mental(MentalArgs),
    /// Equity curve points
    EquityCurve(EquityCurveArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Global(args) => commands::summary::run_global(args),
        Commands::BySetup(args) => commands::grouped::run_by_setup(args),
        Commands::BySession(args) => commands::grouped::run_by_session(args),
        Commands::Daily(args) => commands::timeline::run_daily(args),
        Commands::Weekly(args) => commands::timeline::run_weekly(args),
        Commands::Errors(args) => commands::behavior::run_errors(args),
        Commands::Mental(args) => commands::behavior::run_mental(args),
        Commands::EquityCurve(args) => commands::summary::run_equity_curve(args),
        Commands::Version => {
            println!("tj {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
