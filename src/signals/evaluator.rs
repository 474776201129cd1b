//! Buy/sell rule evaluation over the most recent merged indicator row.

use crate::indicators::IndicatorSnapshot;
use crate::models::{Candle, SignalDirection, SignalEvent};

/// Fraction of the support/resistance half-zone the price must cover to
/// count as "near" the level.
const ZONE_PROXIMITY: f64 = 0.9;

const STOCH_OVERBOUGHT: f64 = 80.0;
const STOCH_OVERSOLD: f64 = 20.0;
const MIN_STREAK: i32 = 3;

/// Evaluate the last row of a snapshot for one instrument.
///
/// SELL is checked first; at most one direction fires per evaluation. Any
/// undefined value in a required column means no signal.
pub fn evaluate(
    candles: &[Candle],
    snapshot: &IndicatorSnapshot,
    display_name: &str,
) -> Option<SignalEvent> {
    let i = candles.len().checked_sub(1)?;
    if snapshot.len() != candles.len() {
        return None;
    }

    let last = &candles[i];
    let resistance = snapshot.resistance[i]?;
    let support = snapshot.support[i]?;
    let band_upper = snapshot.band_upper[i]?;
    let band_lower = snapshot.band_lower[i]?;
    let percent_k = snapshot.percent_k[i]?;
    let streak = snapshot.streak[i];

    let mid = (resistance + support) / 2.0;

    let upper_zone_height = resistance - mid;
    let near_resistance =
        upper_zone_height > 0.0 && (last.high - mid) / upper_zone_height >= ZONE_PROXIMITY;

    let sell = near_resistance
        && snapshot.prev_channel_upper[i]
            .map(|prev_upper| last.high > prev_upper)
            .unwrap_or(false)
        && last.high > band_upper
        && percent_k > STOCH_OVERBOUGHT
        && streak >= MIN_STREAK;

    if sell {
        return Some(SignalEvent::new(display_name, SignalDirection::Sell));
    }

    let lower_zone_height = mid - support;
    let near_support =
        lower_zone_height > 0.0 && (mid - last.low) / lower_zone_height >= ZONE_PROXIMITY;

    let buy = near_support
        && snapshot.prev_channel_lower[i]
            .map(|prev_lower| last.low < prev_lower)
            .unwrap_or(false)
        && last.low < band_lower
        && percent_k < STOCH_OVERSOLD
        && streak <= -MIN_STREAK;

    if buy {
        return Some(SignalEvent::new(display_name, SignalDirection::Buy));
    }

    None
}
