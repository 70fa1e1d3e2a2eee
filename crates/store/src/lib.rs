pub mod klines;
pub mod signals;

pub use klines::KlineStore;
pub use signals::SignalStore;

use chrono::{DateTime, Utc};
use common::Result;

/// Timestamps are stored as RFC 3339 TEXT; this is the single decode path.
pub(crate) fn parse_utc(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}
