//! RSI (Relative Strength Index)
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = smoothed average gain / smoothed average loss
//!
//! Gains and losses are smoothed with a Wilder-style exponential weighted
//! mean (alpha = 1/period, weight-adjusted) and the output stays undefined
//! until `period` price changes have been observed.

use crate::models::Candle;

/// Calculate RSI per candle, aligned with the input series.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; candles.len()];
    if candles.len() < 2 || period == 0 {
        return out;
    }

    let alpha = 1.0 / period as f64;
    let decay = 1.0 - alpha;

    // Weight-adjusted EWM: value = num / den with num_i = x_i + decay * num_{i-1}.
    let mut gain_num = 0.0;
    let mut loss_num = 0.0;
    let mut den = 0.0;
    let mut observed = 0usize;

    for i in 1..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { change.abs() } else { 0.0 };

        gain_num = gain + decay * gain_num;
        loss_num = loss + decay * loss_num;
        den = 1.0 + decay * den;
        observed += 1;

        if observed < period {
            continue;
        }

        let avg_gain = gain_num / den;
        let avg_loss = loss_num / den;
        if avg_loss == 0.0 {
            // Flat or monotonically rising window; RS is undefined.
            continue;
        }
        let rs = avg_gain / avg_loss;
        out[i] = Some(100.0 - 100.0 / (1.0 + rs));
    }

    out
}
