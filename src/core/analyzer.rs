//! Per-instrument analysis task: fetch -> indicators -> evaluate -> dedup ->
//! dispatch. Every failure mode here is contained to the one instrument's
//! tick.

use crate::core::context::EngineContext;
use crate::indicators::{self, MIN_ROWS};
use crate::models::SignalDirection;
use crate::signals;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn analyze_instrument(ctx: Arc<EngineContext>, instrument: String) {
    let candles = ctx
        .session
        .realtime_candles(&instrument, ctx.timeframe_secs)
        .await;
    if candles.is_empty() {
        // Disconnected or fetch failure; skip this tick.
        return;
    }

    let live_candle_time = match candles.last() {
        Some(c) => c.open_time,
        None => return,
    };

    let window = if candles.len() > ctx.candle_count {
        &candles[candles.len() - ctx.candle_count..]
    } else {
        &candles[..]
    };

    let snapshot = indicators::snapshot::compute(window, &ctx.indicator_config);
    if snapshot.len() < MIN_ROWS {
        debug!(
            instrument = %instrument,
            rows = snapshot.len(),
            "[{}] Not enough history ({} rows), skipping",
            instrument,
            snapshot.len()
        );
        return;
    }

    let display_name = ctx.catalog.display_name(&instrument);
    let Some(event) = signals::evaluate(window, &snapshot, display_name) else {
        return;
    };

    // One emission per instrument per candle; the entry is recorded before
    // the dispatch attempt and not rolled back on sink failure.
    if !ctx.dedup.check_and_record(&instrument, live_candle_time) {
        debug!(
            instrument = %instrument,
            "[{}] Signal already emitted for this candle",
            instrument
        );
        return;
    }

    match event.direction {
        SignalDirection::Sell => {
            info!(instrument = %instrument, "[{}] SIGNAL: 🔻 SELL", instrument)
        }
        SignalDirection::Buy => {
            info!(instrument = %instrument, "[{}] SIGNAL: 🔺 BUY", instrument)
        }
    }
    if let Some(ref metrics) = ctx.metrics {
        metrics.signals_emitted_total.inc();
    }

    ctx.dispatcher.dispatch(&event).await;
}
