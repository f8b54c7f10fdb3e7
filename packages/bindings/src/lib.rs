use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;

use trade_journal_core::{validate, Trade};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Every view takes the already-filtered trade collection as a JSON
/// array; the ingestion validation runs before the engine sees it.
fn parse_trades(trades_json: &str) -> NapiResult<Vec<Trade>> {
    let trades: Vec<Trade> = serde_json::from_str(trades_json).map_err(to_napi_error)?;
    validate::validate_trades(&trades).map_err(to_napi_error)?;
    Ok(trades)
}

fn parse_as_of(as_of: &str) -> NapiResult<NaiveDate> {
    as_of.parse::<NaiveDate>().map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Summary views
// ---------------------------------------------------------------------------

#[napi]
pub fn global_stats(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::global_stats::calculate_global_stats(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn equity_curve(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::equity::calculate_equity_curve(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Grouped views
// ---------------------------------------------------------------------------

#[napi]
pub fn stats_by_setup(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::grouped::calculate_stats_by_setup(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn stats_by_session(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::grouped::calculate_stats_by_session(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time-bucketed views
// ---------------------------------------------------------------------------

#[napi]
pub fn daily_stats(trades_json: String, days: u32, as_of: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let as_of = parse_as_of(&as_of)?;
    let output = trade_journal_core::stats::timeline::calculate_daily_stats(&trades, days, as_of)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn weekly_stats(trades_json: String, weeks: u32, as_of: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let as_of = parse_as_of(&as_of)?;
    let output = trade_journal_core::stats::timeline::calculate_weekly_stats(&trades, weeks, as_of)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Behavioral views
// ---------------------------------------------------------------------------

#[napi]
pub fn error_stats(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::error_stats::calculate_error_stats(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn mental_stats(trades_json: String) -> NapiResult<String> {
    let trades = parse_trades(&trades_json)?;
    let output = trade_journal_core::stats::mental::calculate_mental_stats(&trades)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
