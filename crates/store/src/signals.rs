use sqlx::{Row, SqlitePool};
use tracing::debug;

use common::{ClosedSignalRecord, OpenSignal, Result, SignalStatus};

use crate::parse_utc;

/// Reads signals under observation and applies closure writes.
#[derive(Clone)]
pub struct SignalStore {
    db: SqlitePool,
}

impl SignalStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// All signals still under observation (status `open` or NULL),
    /// oldest first.
    pub async fn open_signals(&self) -> Result<Vec<OpenSignal>> {
        let rows = sqlx::query(
            r#"
            SELECT id, coin, model_name, created_at, entry, take_profit, stop_loss
            FROM strategy_signals
            WHERE status IS NULL OR status = 'open'
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.iter()
            .map(|row| {
                let created_at: String = row.try_get("created_at")?;
                Ok(OpenSignal {
                    id: row.try_get("id")?,
                    coin: row.try_get("coin")?,
                    model: row.try_get("model_name")?,
                    created_at: parse_utc(&created_at)?,
                    entry: row.try_get("entry")?,
                    take_profit: row.try_get("take_profit")?,
                    stop_loss: row.try_get("stop_loss")?,
                })
            })
            .collect()
    }

    /// Apply a closure durably and idempotently.
    ///
    /// The ledger insert is keyed by signal id and skips duplicates; the
    /// status update only touches rows that are still open, so a closed
    /// signal's fields never change again. Both statements share one
    /// transaction; a retry after a partial failure re-attempts them
    /// jointly.
    pub async fn close(&self, record: &ClosedSignalRecord) -> Result<()> {
        let outcome = record.outcome.to_string();
        let status = SignalStatus::Closed.to_string();
        let created_at = record.created_at.to_rfc3339();
        let closed_at = record.closed_at.to_rfc3339();

        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO closed_signals (id, coin, model_name, created_at, closed_at, entry, exit, profit, outcome)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(&record.coin)
        .bind(&record.model)
        .bind(&created_at)
        .bind(&closed_at)
        .bind(record.entry)
        .bind(record.exit)
        .bind(record.profit)
        .bind(&outcome)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE strategy_signals
            SET status = ?1, exit_price = ?2, closed_at = ?3, outcome = ?4
            WHERE id = ?5 AND (status IS NULL OR status = 'open')
            "#,
        )
        .bind(&status)
        .bind(record.exit)
        .bind(&closed_at)
        .bind(&outcome)
        .bind(&record.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if updated.rows_affected() == 0 {
            debug!(id = %record.id, "Signal already closed; status untouched");
        }
        Ok(())
    }
}
