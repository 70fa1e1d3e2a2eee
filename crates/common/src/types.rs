use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal outcome of a tracked signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
pub enum Outcome {
    TakeProfit,
    StopLoss,
    Timeout,
}

impl Outcome {
    /// Human-readable label used in notification messages.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::TakeProfit => "Take Profit",
            Outcome::StopLoss => "Stop Loss",
            Outcome::Timeout => "Timeout",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::TakeProfit => write!(f, "take_profit"),
            Outcome::StopLoss => write!(f, "stop_loss"),
            Outcome::Timeout => write!(f, "timeout"),
        }
    }
}

/// Lifecycle state of a signal row. A NULL status in the database is
/// treated as `Open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum SignalStatus {
    Open,
    Closed,
}

impl std::fmt::Display for SignalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalStatus::Open => write!(f, "open"),
            SignalStatus::Closed => write!(f, "closed"),
        }
    }
}

/// A BUY hypothesis under observation: entry with target and stop levels.
///
/// Created by the upstream signal generator; this system only ever closes
/// it. Levels satisfy `take_profit > entry > stop_loss` for a well-formed
/// long signal, but the evaluator does not depend on that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSignal {
    pub id: String,
    pub coin: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub entry: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
}

/// One observed close price for a symbol/timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    pub open_time: DateTime<Utc>,
    pub close: f64,
}

/// The decision that ends a signal's open state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closure {
    pub outcome: Outcome,
    pub exit: f64,
    pub profit: f64,
    pub closed_at: DateTime<Utc>,
}

/// Append-only audit row, written at most once per signal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedSignalRecord {
    pub id: String,
    pub coin: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    pub entry: f64,
    pub exit: f64,
    pub profit: f64,
    pub outcome: Outcome,
}

impl ClosedSignalRecord {
    pub fn new(signal: &OpenSignal, closure: &Closure) -> Self {
        Self {
            id: signal.id.clone(),
            coin: signal.coin.clone(),
            model: signal.model.clone(),
            created_at: signal.created_at,
            closed_at: closure.closed_at,
            entry: signal.entry,
            exit: closure.exit,
            profit: closure.profit,
            outcome: closure.outcome,
        }
    }
}
