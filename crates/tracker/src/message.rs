use common::{Closure, OpenSignal, Outcome};

/// Telegram text for a closed signal. Markdown, one message per closure.
pub fn closure_message(signal: &OpenSignal, closure: &Closure) -> String {
    let emoji = match closure.outcome {
        Outcome::TakeProfit => "🎯",
        Outcome::StopLoss => "💥",
        Outcome::Timeout => "⏳",
    };
    let pct = (closure.exit - signal.entry) / signal.entry * 100.0;

    format!(
        "{emoji} *Signal Closed: {title}*\n\
         🪙 Coin: {coin}\n\
         📊 Model: {model}\n\
         💰 Entry: {entry:.4}\n\
         💸 Exit: {exit:.4}\n\
         📊 PnL: {profit:+.4} ({pct:+.2}%)\n\
         ⏱️ Closed: {closed_at}",
        title = closure.outcome.label(),
        coin = signal.coin,
        model = signal.model,
        entry = signal.entry,
        exit = closure.exit,
        profit = closure.profit,
        closed_at = closure.closed_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}
