use crate::helpers::{candle, flat_series};
use optrix::indicators::momentum::stochastic::calculate_stochastic;

#[test]
fn raw_percent_k_over_the_range() {
    let candles = vec![
        candle(0, 1.0, 2.0, 0.0, 1.0),
        candle(1, 2.0, 4.0, 2.0, 3.0),
        candle(2, 3.5, 4.0, 2.0, 4.0),
    ];
    let stoch = calculate_stochastic(&candles, 2, 1, 1);

    // i=1: range 0..4, close 3 -> 75. i=2: range 2..4, close 4 -> 100.
    assert_eq!(stoch.percent_k, vec![None, Some(75.0), Some(100.0)]);
    assert_eq!(stoch.percent_d, vec![None, Some(75.0), Some(100.0)]);
}

#[test]
fn smoothing_averages_raw_values() {
    let candles = vec![
        candle(0, 1.0, 2.0, 0.0, 1.0),
        candle(1, 2.0, 4.0, 2.0, 3.0),
        candle(2, 3.5, 4.0, 2.0, 4.0),
    ];
    let stoch = calculate_stochastic(&candles, 2, 2, 1);
    // SMA(75, 100) = 87.5, first defined at i=2.
    assert_eq!(stoch.percent_k, vec![None, None, Some(87.5)]);
}

#[test]
fn flat_range_yields_undefined_without_error() {
    let candles = flat_series(30);
    let stoch = calculate_stochastic(&candles, 13, 3, 3);
    assert!(stoch.percent_k.iter().all(|v| v.is_none()));
    assert!(stoch.percent_d.iter().all(|v| v.is_none()));
}
