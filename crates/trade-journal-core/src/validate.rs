//! Ingestion-boundary checks. The statistics functions assume records
//! that passed here; feeding them unvalidated data is a caller bug.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::JournalError;
use crate::types::Trade;
use crate::JournalResult;

/// Validate a single trade record against the journal's field rules.
pub fn validate_trade(trade: &Trade) -> JournalResult<()> {
    if trade.entry <= Decimal::ZERO {
        return Err(invalid("entry", "price level must be positive"));
    }
    if trade.stop_loss <= Decimal::ZERO {
        return Err(invalid("stop_loss", "price level must be positive"));
    }
    if let Some(tp) = trade.take_profit {
        if tp <= Decimal::ZERO {
            return Err(invalid("take_profit", "price level must be positive"));
        }
    }
    if trade.risk_pct <= Decimal::ZERO || trade.risk_pct > dec!(100) {
        return Err(invalid("risk_pct", "must be within (0, 100]"));
    }
    if trade.risk_usd <= Decimal::ZERO {
        return Err(invalid("risk_usd", "risked amount must be positive"));
    }
    if trade.rr_expected <= Decimal::ZERO {
        return Err(invalid("rr_expected", "planned risk/reward must be positive"));
    }
    if let Some(state) = trade.mental_state {
        if !(1..=5).contains(&state) {
            return Err(invalid("mental_state", "rating must be within 1..=5"));
        }
    }
    Ok(())
}

/// Validate a whole collection, pointing at the first offending trade.
pub fn validate_trades(trades: &[Trade]) -> JournalResult<()> {
    for trade in trades {
        validate_trade(trade).map_err(|e| match e {
            JournalError::InvalidInput { field, reason } => JournalError::InvalidInput {
                field,
                reason: format!("trade {}: {}", trade.id, reason),
            },
            other => other,
        })?;
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> JournalError {
    JournalError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn valid_trade() -> Trade {
        Trade {
            id: 42,
            date: NaiveDate::from_ymd_opt(2025, 3, 3)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            instrument: "XAUUSD".into(),
            session: "London".into(),
            setup: "CRT".into(),
            direction: Direction::Long,
            timeframe: "M15".into(),
            entry: dec!(2400),
            stop_loss: dec!(2395),
            take_profit: Some(dec!(2410)),
            risk_pct: dec!(1),
            risk_usd: dec!(100),
            rr_expected: dec!(2),
            result_r: Some(dec!(2)),
            pnl_usd: Some(dec!(200)),
            duration_min: Some(45),
            respected_plan: true,
            error: false,
            error_type: None,
            mental_state: Some(4),
            notes: None,
        }
    }

    // 1. A well-formed record passes
    #[test]
    fn test_valid_trade() {
        assert!(validate_trade(&valid_trade()).is_ok());
    }

    // 2. Price levels must be positive
    #[test]
    fn test_price_levels() {
        let mut trade = valid_trade();
        trade.entry = Decimal::ZERO;
        assert!(validate_trade(&trade).is_err());

        let mut trade = valid_trade();
        trade.take_profit = Some(dec!(-1));
        assert!(validate_trade(&trade).is_err());
    }

    // 3. Risk percent is bounded by the whole account
    #[test]
    fn test_risk_pct_bounds() {
        let mut trade = valid_trade();
        trade.risk_pct = dec!(100);
        assert!(validate_trade(&trade).is_ok());

        trade.risk_pct = dec!(100.5);
        assert!(validate_trade(&trade).is_err());

        trade.risk_pct = Decimal::ZERO;
        assert!(validate_trade(&trade).is_err());
    }

    // 4. Mental state outside 1..=5 is rejected
    #[test]
    fn test_mental_state_range() {
        let mut trade = valid_trade();
        trade.mental_state = Some(6);
        let err = validate_trade(&trade).unwrap_err();
        match err {
            JournalError::InvalidInput { field, .. } => assert_eq!(field, "mental_state"),
            other => panic!("unexpected error: {other}"),
        }
    }

    // 5. Collection validation names the offending trade
    #[test]
    fn test_collection_names_trade() {
        let mut bad = valid_trade();
        bad.risk_usd = Decimal::ZERO;
        let err = validate_trades(&[valid_trade(), bad]).unwrap_err();
        match err {
            JournalError::InvalidInput { reason, .. } => {
                assert!(reason.contains("trade 42"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
