use chrono::Utc;
use tracing::{debug, error, info, warn};

use common::Result;
use store::{KlineStore, SignalStore};

use crate::evaluator::{evaluate, window_end, Verdict};
use crate::recorder::Recorder;

/// One sweep over all open signals, oldest first.
///
/// Holds no state across invocations (everything lives in the store) and
/// is meant to be run periodically by an external scheduler. Signals with
/// no verdict are left untouched and revisited on the next run.
pub struct Tracker {
    signals: SignalStore,
    klines: KlineStore,
    recorder: Recorder,
    timeframe: String,
}

impl Tracker {
    pub fn new(
        signals: SignalStore,
        klines: KlineStore,
        recorder: Recorder,
        timeframe: impl Into<String>,
    ) -> Self {
        Self {
            signals,
            klines,
            recorder,
            timeframe: timeframe.into(),
        }
    }

    /// Evaluate every open signal once. A failure on one signal is logged
    /// and does not stop the sweep; that signal is retried on the next
    /// invocation.
    pub async fn run_once(&self) -> Result<()> {
        let open = self.signals.open_signals().await?;
        if open.is_empty() {
            info!("No open signals");
            return Ok(());
        }
        info!(count = open.len(), "Checking open signals");

        for signal in &open {
            let end = window_end(signal.created_at);
            let bars = match self
                .klines
                .closes(&signal.coin, &self.timeframe, signal.created_at, end)
                .await
            {
                Ok(bars) => bars,
                Err(e) => {
                    error!(id = %signal.id, coin = %signal.coin, error = %e, "Failed to load klines");
                    continue;
                }
            };

            match evaluate(signal, &bars, Utc::now()) {
                Verdict::Close(closure) => {
                    if let Err(e) = self.recorder.apply(signal, &closure).await {
                        error!(id = %signal.id, error = %e, "Failed to record closure");
                    }
                }
                Verdict::Pending => {
                    debug!(id = %signal.id, coin = %signal.coin, "Still within observation window");
                }
                Verdict::NoData => {
                    warn!(id = %signal.id, coin = %signal.coin, "No kline data for signal window");
                }
            }
        }

        Ok(())
    }
}
