use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use trade_journal_core::{validate, Direction, Trade};

/// Caller-side filter surface. The statistics engine expects an already
/// filtered collection; these flags are that filter.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only trades on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only trades on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only trades on this instrument
    #[arg(long)]
    pub instrument: Option<String>,

    /// Only trades with this setup
    #[arg(long)]
    pub setup: Option<String>,

    /// Only trades in this session
    #[arg(long)]
    pub session: Option<String>,

    /// Only trades in this direction (LONG or SHORT)
    #[arg(long)]
    pub direction: Option<String>,

    /// Keep only winning trades
    #[arg(long)]
    pub winners: bool,

    /// Keep only losing and breakeven trades
    #[arg(long, conflicts_with = "winners")]
    pub losers: bool,
}

/// Load the trade collection from a JSON file or piped stdin, then run
/// it through the ingestion validation.
pub fn load_trades(path: &Option<String>) -> Result<Vec<Trade>, Box<dyn std::error::Error>> {
    let trades: Vec<Trade> = if let Some(path) = path {
        let resolved = resolve_path(path)?;
        let contents = fs::read_to_string(&resolved)
            .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?
    } else if let Some(data) = read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <trades.json> or piped stdin required".into());
    };

    validate::validate_trades(&trades)?;
    Ok(trades)
}

/// Apply the filter flags, preserving order.
pub fn apply_filters(
    trades: Vec<Trade>,
    filter: &FilterArgs,
) -> Result<Vec<Trade>, Box<dyn std::error::Error>> {
    let direction = match filter.direction.as_deref() {
        Some(d) => Some(parse_direction(d)?),
        None => None,
    };

    Ok(trades
        .into_iter()
        .filter(|t| {
            if let Some(from) = filter.from {
                if t.date.date() < from {
                    return false;
                }
            }
            if let Some(to) = filter.to {
                if t.date.date() > to {
                    return false;
                }
            }
            if let Some(ref instrument) = filter.instrument {
                if &t.instrument != instrument {
                    return false;
                }
            }
            if let Some(ref setup) = filter.setup {
                if &t.setup != setup {
                    return false;
                }
            }
            if let Some(ref session) = filter.session {
                if &t.session != session {
                    return false;
                }
            }
            if let Some(direction) = direction {
                if t.direction != direction {
                    return false;
                }
            }
            // An open trade is neither a winner nor a loser yet
            if filter.winners && !t.result_r.is_some_and(|r| r > Decimal::ZERO) {
                return false;
            }
            if filter.losers && !t.result_r.is_some_and(|r| r <= Decimal::ZERO) {
                return false;
            }
            true
        })
        .collect())
}

fn parse_direction(raw: &str) -> Result<Direction, Box<dyn std::error::Error>> {
    match raw.to_ascii_uppercase().as_str() {
        "LONG" => Ok(Direction::Long),
        "SHORT" => Ok(Direction::Short),
        other => Err(format!("Unknown direction '{other}', expected LONG or SHORT").into()),
    }
}

/// Attempt to read JSON from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Resolve the input path relative to the working directory and make
/// sure it points at a readable file.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(id: u64, day: u32, direction: Direction, result_r: Option<Decimal>) -> Trade {
        Trade {
            id,
            date: NaiveDate::from_ymd_opt(2025, 8, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            instrument: "XAUUSD".into(),
            session: "London".into(),
            setup: "CRT".into(),
            direction,
            timeframe: "M15".into(),
            entry: dec!(2400),
            stop_loss: dec!(2395),
            take_profit: None,
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r,
            pnl_usd: None,
            duration_min: None,
            respected_plan: true,
            error: false,
            error_type: None,
            mental_state: None,
            notes: None,
        }
    }

    // 1. Date range keeps the boundary days
    #[test]
    fn test_date_range_inclusive() {
        let trades = vec![
            trade(1, 1, Direction::Long, None),
            trade(2, 5, Direction::Long, None),
            trade(3, 9, Direction::Long, None),
        ];
        let filter = FilterArgs {
            from: Some(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()),
            to: Some(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()),
            ..Default::default()
        };
        let kept = apply_filters(trades, &filter).unwrap();
        let ids: Vec<u64> = kept.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    // 2. Outcome flags exclude open trades either way
    #[test]
    fn test_outcome_flags() {
        let trades = vec![
            trade(1, 1, Direction::Long, Some(dec!(2))),
            trade(2, 2, Direction::Long, Some(dec!(-1))),
            trade(3, 3, Direction::Long, Some(Decimal::ZERO)),
            trade(4, 4, Direction::Long, None),
        ];

        let winners = apply_filters(
            trades.clone(),
            &FilterArgs {
                winners: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].id, 1);

        let losers = apply_filters(
            trades,
            &FilterArgs {
                losers: true,
                ..Default::default()
            },
        )
        .unwrap();
        let ids: Vec<u64> = losers.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    // 3. Direction parsing is case-insensitive, garbage rejected
    #[test]
    fn test_direction_filter() {
        let trades = vec![
            trade(1, 1, Direction::Long, None),
            trade(2, 2, Direction::Short, None),
        ];
        let filter = FilterArgs {
            direction: Some("short".into()),
            ..Default::default()
        };
        let kept = apply_filters(trades.clone(), &filter).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);

        let bad = FilterArgs {
            direction: Some("sideways".into()),
            ..Default::default()
        };
        assert!(apply_filters(trades, &bad).is_err());
    }

    // 4. Categorical filters compose
    #[test]
    fn test_categorical_filters() {
        let mut ny = trade(2, 2, Direction::Long, None);
        ny.session = "NY".into();
        ny.setup = "BOS".into();
        let trades = vec![trade(1, 1, Direction::Long, None), ny];

        let filter = FilterArgs {
            session: Some("NY".into()),
            setup: Some("BOS".into()),
            ..Default::default()
        };
        let kept = apply_filters(trades, &filter).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }
}
