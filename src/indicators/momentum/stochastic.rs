//! Slow stochastic oscillator
//!
//! raw %K = 100 * (close - lowest low) / (highest high - lowest low)
//! %K = SMA(raw %K, smooth), %D = SMA(%K, d_period)
//!
//! A flat range (highest high == lowest low) leaves raw %K undefined for
//! that index; the smoothing windows propagate the gap.

use crate::indicators::{rolling_max, rolling_mean_opt, rolling_min};
use crate::models::Candle;

pub struct Stochastic {
    pub percent_k: Vec<Option<f64>>,
    pub percent_d: Vec<Option<f64>>,
}

/// Calculate the slow stochastic oscillator.
pub fn calculate_stochastic(
    candles: &[Candle],
    k_period: usize,
    smooth_period: usize,
    d_period: usize,
) -> Stochastic {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    let highest_high = rolling_max(&highs, k_period);
    let lowest_low = rolling_min(&lows, k_period);

    let raw_k: Vec<Option<f64>> = candles
        .iter()
        .enumerate()
        .map(|(i, c)| match (highest_high[i], lowest_low[i]) {
            (Some(hh), Some(ll)) if (hh - ll).abs() > f64::EPSILON => {
                Some(100.0 * (c.close - ll) / (hh - ll))
            }
            _ => None,
        })
        .collect();

    let percent_k = rolling_mean_opt(&raw_k, smooth_period);
    let percent_d = rolling_mean_opt(&percent_k, d_period);

    Stochastic {
        percent_k,
        percent_d,
    }
}
