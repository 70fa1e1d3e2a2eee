use chrono::{DateTime, Duration, Utc};

use common::{Closure, OpenSignal, Outcome, PriceBar};

/// Hours a signal is observed before it times out. Compiled-in constant,
/// not user-configurable.
pub const WINDOW_HOURS: i64 = 12;

/// End of the observation window for a signal created at `created_at`.
pub fn window_end(created_at: DateTime<Utc>) -> DateTime<Utc> {
    created_at + Duration::hours(WINDOW_HOURS)
}

/// Result of evaluating one signal against its price window.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// A terminal condition fired; the signal should be closed.
    Close(Closure),
    /// Nothing fired and the window has not elapsed yet. Signal stays open.
    Pending,
    /// No bars were recorded for the window at all. Signal stays open.
    NoData,
}

/// Scan `bars` (oldest first) and decide whether `signal` has concluded.
///
/// The first bar whose close reaches the take-profit level ends the scan;
/// the recorded exit is the target level itself, not the bar's close. A
/// close at or below the stop level exits at the bar's close. When one bar
/// satisfies both thresholds, take-profit wins. If nothing fires and `now`
/// is past the end of the window, the signal times out at the last
/// observed close.
///
/// Pure function of its inputs: no I/O, never errors.
pub fn evaluate(signal: &OpenSignal, bars: &[PriceBar], now: DateTime<Utc>) -> Verdict {
    for bar in bars {
        if bar.close >= signal.take_profit {
            return Verdict::Close(Closure {
                outcome: Outcome::TakeProfit,
                exit: signal.take_profit,
                profit: signal.take_profit - signal.entry,
                closed_at: bar.open_time,
            });
        }
        if bar.close <= signal.stop_loss {
            return Verdict::Close(Closure {
                outcome: Outcome::StopLoss,
                exit: bar.close,
                profit: bar.close - signal.entry,
                closed_at: bar.open_time,
            });
        }
    }

    let Some(last) = bars.last() else {
        return Verdict::NoData;
    };

    if now >= window_end(signal.created_at) {
        Verdict::Close(Closure {
            outcome: Outcome::Timeout,
            exit: last.close,
            profit: last.close - signal.entry,
            closed_at: last.open_time,
        })
    } else {
        Verdict::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn signal(entry: f64, take_profit: f64, stop_loss: f64) -> OpenSignal {
        OpenSignal {
            id: "sig-1".into(),
            coin: "BTCUSDT".into(),
            model: "LSTMModel".into(),
            created_at: created_at(),
            entry,
            take_profit,
            stop_loss,
        }
    }

    fn bar(hours: i64, close: f64) -> PriceBar {
        PriceBar {
            open_time: created_at() + Duration::hours(hours),
            close,
        }
    }

    fn closure(verdict: Verdict) -> Closure {
        match verdict {
            Verdict::Close(c) => c,
            other => panic!("expected a closure, got {other:?}"),
        }
    }

    #[test]
    fn take_profit_exits_at_the_target_level() {
        let sig = signal(100.0, 110.0, 95.0);
        let bars = vec![bar(0, 102.0), bar(1, 111.0), bar(2, 90.0)];

        let c = closure(evaluate(&sig, &bars, created_at() + Duration::hours(3)));
        assert_eq!(c.outcome, Outcome::TakeProfit);
        // Target level, not the 111.0 close
        assert_eq!(c.exit, 110.0);
        assert_eq!(c.profit, 10.0);
        assert_eq!(c.closed_at, bars[1].open_time);
    }

    #[test]
    fn overshoot_does_not_change_the_exit() {
        let sig = signal(100.0, 110.0, 95.0);
        let bars = vec![bar(0, 250.0)];

        let c = closure(evaluate(&sig, &bars, created_at() + Duration::hours(1)));
        assert_eq!(c.outcome, Outcome::TakeProfit);
        assert_eq!(c.exit, 110.0);
    }

    #[test]
    fn stop_loss_exits_at_the_bar_close() {
        let sig = signal(100.0, 110.0, 95.0);
        let bars = vec![bar(0, 97.0), bar(1, 94.0)];

        let c = closure(evaluate(&sig, &bars, created_at() + Duration::hours(2)));
        assert_eq!(c.outcome, Outcome::StopLoss);
        assert_eq!(c.exit, 94.0);
        assert_eq!(c.profit, -6.0);
        assert_eq!(c.closed_at, bars[1].open_time);
    }

    #[test]
    fn scan_stops_at_the_first_qualifying_bar() {
        let sig = signal(100.0, 110.0, 95.0);
        // The stop-loss bar after the take-profit bar must be irrelevant
        let bars = vec![bar(0, 110.0), bar(1, 10.0)];

        let c = closure(evaluate(&sig, &bars, created_at() + Duration::hours(2)));
        assert_eq!(c.outcome, Outcome::TakeProfit);
        assert_eq!(c.closed_at, bars[0].open_time);
    }

    #[test]
    fn take_profit_beats_stop_loss_on_the_same_bar() {
        // Degenerate levels where a single close satisfies both thresholds
        let sig = signal(100.0, 100.0, 100.0);
        let bars = vec![bar(0, 100.0)];

        let c = closure(evaluate(&sig, &bars, created_at() + Duration::hours(1)));
        assert_eq!(c.outcome, Outcome::TakeProfit);
        assert_eq!(c.exit, 100.0);
    }

    #[test]
    fn timeout_uses_the_last_observed_bar() {
        let sig = signal(100.0, 110.0, 95.0);
        let bars = vec![bar(0, 99.0), bar(11, 101.0)];

        let c = closure(evaluate(&sig, &bars, window_end(created_at())));
        assert_eq!(c.outcome, Outcome::Timeout);
        assert_eq!(c.exit, 101.0);
        assert_eq!(c.profit, 1.0);
        assert_eq!(c.closed_at, bars[1].open_time);
    }

    #[test]
    fn open_window_with_no_trigger_is_pending() {
        let sig = signal(100.0, 110.0, 95.0);
        let bars = vec![bar(0, 99.0), bar(1, 101.0)];

        let verdict = evaluate(&sig, &bars, created_at() + Duration::hours(6));
        assert_eq!(verdict, Verdict::Pending);
    }

    #[test]
    fn no_bars_reports_no_data_even_after_the_window() {
        let sig = signal(100.0, 110.0, 95.0);

        assert_eq!(evaluate(&sig, &[], created_at() + Duration::hours(1)), Verdict::NoData);
        assert_eq!(evaluate(&sig, &[], created_at() + Duration::hours(24)), Verdict::NoData);
    }
}
