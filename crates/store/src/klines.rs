use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};

use common::{PriceBar, Result};

use crate::parse_utc;

/// Read-side access to the stored kline history.
#[derive(Clone)]
pub struct KlineStore {
    db: SqlitePool,
}

impl KlineStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Close prices for `symbol`/`timeframe` with open times between
    /// `start` and `end` (both inclusive), oldest first. An empty result
    /// is valid: it means nothing was recorded for the window.
    pub async fn closes(
        &self,
        symbol: &str,
        timeframe: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>> {
        let rows = sqlx::query(
            r#"
            SELECT open_time, close
            FROM klines
            WHERE symbol = ?1
              AND timeframe = ?2
              AND open_time >= ?3
              AND open_time <= ?4
            ORDER BY open_time ASC
            "#,
        )
        .bind(symbol)
        .bind(timeframe)
        .bind(start.to_rfc3339())
        .bind(end.to_rfc3339())
        .fetch_all(&self.db)
        .await?;

        rows.iter()
            .map(|row| {
                let open_time: String = row.try_get("open_time")?;
                Ok(PriceBar {
                    open_time: parse_utc(&open_time)?,
                    close: row.try_get("close")?,
                })
            })
            .collect()
    }
}
