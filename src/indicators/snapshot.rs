//! Merged per-series indicator snapshot.

use crate::indicators::momentum::rsi::calculate_rsi;
use crate::indicators::momentum::stochastic::calculate_stochastic;
use crate::indicators::momentum::streak::calculate_streak;
use crate::indicators::structure::donchian::calculate_donchian;
use crate::indicators::structure::support_resistance::calculate_support_resistance;
use crate::indicators::volatility::bollinger::calculate_bollinger_bands;
use crate::models::Candle;

/// Minimum merged rows before an evaluation is meaningful; shorter series
/// carry too many undefined lookback values.
pub const MIN_ROWS: usize = 20;

/// Lookback windows for the full pipeline.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub sr_period: usize,
    pub donchian_period: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub stoch_k_period: usize,
    pub stoch_smooth_period: usize,
    pub stoch_d_period: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sr_period: 25,
            donchian_period: 20,
            bollinger_period: 14,
            bollinger_std_dev: 2.0,
            stoch_k_period: 13,
            stoch_smooth_period: 3,
            stoch_d_period: 3,
            rsi_period: 14,
        }
    }
}

/// All derived columns for one candle series, aligned by index with the
/// source. Every column has the same length as the input.
pub struct IndicatorSnapshot {
    pub resistance: Vec<Option<f64>>,
    pub support: Vec<Option<f64>>,
    pub channel_upper: Vec<Option<f64>>,
    pub channel_middle: Vec<Option<f64>>,
    pub channel_lower: Vec<Option<f64>>,
    pub band_upper: Vec<Option<f64>>,
    pub band_middle: Vec<Option<f64>>,
    pub band_lower: Vec<Option<f64>>,
    pub percent_k: Vec<Option<f64>>,
    pub percent_d: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub streak: Vec<i32>,
    /// Channel upper/lower shifted forward by one row.
    pub prev_channel_upper: Vec<Option<f64>>,
    pub prev_channel_lower: Vec<Option<f64>>,
}

impl IndicatorSnapshot {
    pub fn len(&self) -> usize {
        self.streak.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streak.is_empty()
    }
}

/// Run the full pipeline over a candle series and merge the results.
pub fn compute(candles: &[Candle], config: &IndicatorConfig) -> IndicatorSnapshot {
    let sr = calculate_support_resistance(candles, config.sr_period);
    let channel = calculate_donchian(candles, config.donchian_period);
    let bands =
        calculate_bollinger_bands(candles, config.bollinger_period, config.bollinger_std_dev);
    let stoch = calculate_stochastic(
        candles,
        config.stoch_k_period,
        config.stoch_smooth_period,
        config.stoch_d_period,
    );
    let rsi = calculate_rsi(candles, config.rsi_period);
    let streak = calculate_streak(candles);

    let prev_channel_upper = shift(&channel.upper);
    let prev_channel_lower = shift(&channel.lower);

    IndicatorSnapshot {
        resistance: sr.resistance,
        support: sr.support,
        channel_upper: channel.upper,
        channel_middle: channel.middle,
        channel_lower: channel.lower,
        band_upper: bands.upper,
        band_middle: bands.middle,
        band_lower: bands.lower,
        percent_k: stoch.percent_k,
        percent_d: stoch.percent_d,
        rsi,
        streak,
        prev_channel_upper,
        prev_channel_lower,
    }
}

fn shift(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(None);
        out.extend_from_slice(&values[..values.len() - 1]);
    }
    out
}
