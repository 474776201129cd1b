//! Shared builders for candle series used across test modules.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use optrix::models::Candle;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn candle(i: usize, open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(
        base_time() + Duration::seconds(300 * i as i64),
        open,
        high,
        low,
        close,
    )
}

/// Flat series: every candle identical, zero range. Exercises the
/// division-by-zero paths in the oscillator.
pub fn flat_series(count: usize) -> Vec<Candle> {
    (0..count).map(|i| candle(i, 100.0, 100.0, 100.0, 100.0)).collect()
}

/// 25 range-bound candles establishing support/resistance levels, followed
/// by `rise` strictly rising green candles whose highs clear the prior
/// Donchian upper and the Bollinger upper band. Triggers the SELL rule on
/// the last row.
pub fn sell_series(rise: usize) -> Vec<Candle> {
    let mut out = Vec::new();
    for i in 0..25 {
        out.push(candle(i, 100.0, 100.5, 99.5, 100.0));
    }
    for j in 1..=rise {
        let close = 100.0 + j as f64;
        out.push(candle(24 + j, close - 0.8, close + 3.0, close - 0.9, close));
    }
    out
}

/// Mirror of `sell_series`: range-bound candles, then strictly falling red
/// candles breaking the prior Donchian lower and the Bollinger lower band.
/// Triggers the BUY rule on the last row.
pub fn buy_series(fall: usize) -> Vec<Candle> {
    let mut out = Vec::new();
    for i in 0..25 {
        out.push(candle(i, 100.0, 100.5, 99.5, 100.0));
    }
    for j in 1..=fall {
        let close = 100.0 - j as f64;
        out.push(candle(24 + j, close + 0.8, close + 0.9, close - 3.0, close));
    }
    out
}
