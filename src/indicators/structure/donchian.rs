//! Donchian channel
//!
//! Upper = rolling max(high), Lower = rolling min(low), Middle = midpoint.

use crate::indicators::{rolling_max, rolling_min};
use crate::models::Candle;

pub struct DonchianChannel {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate the Donchian channel over a trailing window.
pub fn calculate_donchian(candles: &[Candle], period: usize) -> DonchianChannel {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let upper = rolling_max(&highs, period);
    let lower = rolling_min(&lows, period);
    let middle = upper
        .iter()
        .zip(lower.iter())
        .map(|(u, l)| match (u, l) {
            (Some(u), Some(l)) => Some((u + l) / 2.0),
            _ => None,
        })
        .collect();

    DonchianChannel {
        upper,
        middle,
        lower,
    }
}
