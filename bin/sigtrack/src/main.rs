use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use common::Config;
use store::{KlineStore, SignalStore};
use telegram_notify::{RetryPolicy, TelegramNotifier};
use tracker::{Recorder, Tracker};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(timeframe = %cfg.kline_timeframe, "SigTrack starting");

    // ── Database ──────────────────────────────────────────────────────────────
    let db = SqlitePool::connect(&cfg.database_url)
        .await
        .unwrap_or_else(|e| panic!("Failed to connect to database: {e}"));
    sqlx::migrate!("../../migrations")
        .run(&db)
        .await
        .unwrap_or_else(|e| panic!("Database migration failed: {e}"));
    info!("Database ready");

    // ── Notifier ──────────────────────────────────────────────────────────────
    let notifier = Arc::new(TelegramNotifier::new(
        &cfg.telegram_token,
        cfg.telegram_chat_id,
        RetryPolicy::default(),
    ));

    // ── Tracker ───────────────────────────────────────────────────────────────
    let recorder = Recorder::new(
        SignalStore::new(db.clone()),
        notifier,
        Duration::from_secs(1),
    );
    let tracker = Tracker::new(
        SignalStore::new(db.clone()),
        KlineStore::new(db),
        recorder,
        cfg.kline_timeframe.clone(),
    );

    // One sweep per invocation; scheduling is the caller's job (cron etc.)
    match tracker.run_once().await {
        Ok(()) => info!("Sweep complete"),
        Err(e) => {
            error!(error = %e, "Sweep failed");
            std::process::exit(1);
        }
    }
}
