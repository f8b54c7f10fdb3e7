use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Trade outcomes expressed in risk-multiples (R).
pub type R = Decimal;

/// Trade direction. Closed set, unlike the string-valued categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

/// A single journal entry. Immutable input to every statistics view —
/// the engine never writes these back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    /// Entry timestamp; ordering and bucketing key.
    pub date: NaiveDateTime,
    /// Traded symbol, e.g. "XAUUSD", "EURUSD"
    pub instrument: String,
    /// Trading session label, e.g. "Asia", "London", "NY", "Overlap"
    pub session: String,
    /// Setup label, e.g. "CRT", "BOS"
    pub setup: String,
    pub direction: Direction,
    /// Chart timeframe, e.g. "M15"
    pub timeframe: String,

    pub entry: Money,
    pub stop_loss: Money,
    pub take_profit: Option<Money>,

    /// Percent of capital risked
    pub risk_pct: Decimal,
    pub risk_usd: Money,
    /// Risk/reward planned at entry
    pub rr_expected: Decimal,

    /// Outcome in risk-multiples; None while the trade is open
    pub result_r: Option<R>,
    pub pnl_usd: Option<Money>,
    pub duration_min: Option<u32>,

    #[serde(default = "default_true")]
    pub respected_plan: bool,
    #[serde(default)]
    pub error: bool,
    /// Meaningful only when `error` is set
    #[serde(default)]
    pub error_type: Option<String>,
    /// Self-rated psychological state, 1-5
    pub mental_state: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Trade {
    /// A trade is scored once an R outcome has been recorded.
    pub fn is_scored(&self) -> bool {
        self.result_r.is_some()
    }

    pub fn is_winner(&self) -> bool {
        matches!(self.result_r, Some(r) if r > Decimal::ZERO)
    }

    pub fn is_loser(&self) -> bool {
        matches!(self.result_r, Some(r) if r < Decimal::ZERO)
    }

    pub fn is_breakeven(&self) -> bool {
        matches!(self.result_r, Some(r) if r == Decimal::ZERO)
    }

    /// Error label for breakdowns. Trades without the error flag never
    /// carry a label, whatever `error_type` says; flagged trades with no
    /// label fall into the "other" bucket.
    pub fn error_label(&self) -> Option<&str> {
        if !self.error {
            return None;
        }
        Some(self.error_type.as_deref().unwrap_or("other"))
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
