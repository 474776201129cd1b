//! Support and Resistance levels
//!
//! A new resistance point is recorded whenever the current high touches the
//! rolling maximum over the lookback; between points the last recorded level
//! is carried forward. Support mirrors this on the low side.

use crate::indicators::{rolling_max, rolling_min};
use crate::models::Candle;

pub struct SupportResistance {
    pub resistance: Vec<Option<f64>>,
    pub support: Vec<Option<f64>>,
}

/// Calculate forward-filled support/resistance levels.
pub fn calculate_support_resistance(candles: &[Candle], period: usize) -> SupportResistance {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let highest_high = rolling_max(&highs, period);
    let lowest_low = rolling_min(&lows, period);

    let mut resistance = Vec::with_capacity(candles.len());
    let mut support = Vec::with_capacity(candles.len());
    let mut last_resistance: Option<f64> = None;
    let mut last_support: Option<f64> = None;

    for i in 0..candles.len() {
        if let Some(hh) = highest_high[i] {
            if highs[i] >= hh {
                last_resistance = Some(highs[i]);
            }
        }
        if let Some(ll) = lowest_low[i] {
            if lows[i] <= ll {
                last_support = Some(lows[i]);
            }
        }
        resistance.push(last_resistance);
        support.push(last_support);
    }

    SupportResistance {
        resistance,
        support,
    }
}
