use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use common::{Closure, ClosedSignalRecord, Notifier, OpenSignal, Result};
use store::SignalStore;

use crate::message::closure_message;

/// Applies a closure decision: one ledger row, one status flip, one message.
///
/// Both writes commit in a single transaction before the notification goes
/// out, so a notifier failure surfaces to the caller but never unwinds a
/// closure that already happened. Re-applying the same decision is a no-op
/// at the store layer.
pub struct Recorder {
    store: SignalStore,
    notifier: Arc<dyn Notifier>,
    /// Pause after each notification to stay under Telegram's send rate.
    notify_pause: Duration,
}

impl Recorder {
    pub fn new(store: SignalStore, notifier: Arc<dyn Notifier>, notify_pause: Duration) -> Self {
        Self {
            store,
            notifier,
            notify_pause,
        }
    }

    pub async fn apply(&self, signal: &OpenSignal, closure: &Closure) -> Result<()> {
        let record = ClosedSignalRecord::new(signal, closure);
        self.store.close(&record).await?;

        info!(
            id = %signal.id,
            coin = %signal.coin,
            model = %signal.model,
            outcome = %closure.outcome,
            entry = signal.entry,
            exit = closure.exit,
            profit = closure.profit,
            "Signal closed"
        );

        self.notifier.send(&closure_message(signal, closure)).await?;
        tokio::time::sleep(self.notify_pause).await;
        Ok(())
    }
}
