//! Bollinger Bands
//!
//! Middle Band = rolling mean of closes
//! Upper Band = Middle + (std_dev * sample standard deviation)
//! Lower Band = Middle - (std_dev * sample standard deviation)

use crate::indicators::{rolling_mean, rolling_stdev};
use crate::models::Candle;

pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands over closes.
pub fn calculate_bollinger_bands(
    candles: &[Candle],
    period: usize,
    std_dev: f64,
) -> BollingerBands {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = rolling_mean(&closes, period);
    let stdev = rolling_stdev(&closes, period);

    let mut upper = Vec::with_capacity(candles.len());
    let mut lower = Vec::with_capacity(candles.len());
    for i in 0..candles.len() {
        match (middle[i], stdev[i]) {
            (Some(m), Some(s)) => {
                upper.push(Some(m + std_dev * s));
                lower.push(Some(m - std_dev * s));
            }
            _ => {
                upper.push(None);
                lower.push(None);
            }
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
