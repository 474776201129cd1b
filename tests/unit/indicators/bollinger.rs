use crate::helpers::{candle, flat_series};
use optrix::indicators::volatility::bollinger::calculate_bollinger_bands;

#[test]
fn bands_use_sample_standard_deviation() {
    let candles = vec![
        candle(0, 1.0, 1.0, 1.0, 1.0),
        candle(1, 3.0, 3.0, 3.0, 3.0),
        candle(2, 5.0, 5.0, 5.0, 5.0),
    ];
    let bands = calculate_bollinger_bands(&candles, 2, 2.0);

    assert_eq!(bands.middle, vec![None, Some(2.0), Some(4.0)]);
    // Sample stdev of (1, 3) is sqrt(2).
    let sqrt2 = 2.0_f64.sqrt();
    assert!((bands.upper[1].unwrap() - (2.0 + 2.0 * sqrt2)).abs() < 1e-12);
    assert!((bands.lower[1].unwrap() - (2.0 - 2.0 * sqrt2)).abs() < 1e-12);
}

#[test]
fn flat_closes_collapse_the_bands_onto_the_mean() {
    let candles = flat_series(20);
    let bands = calculate_bollinger_bands(&candles, 14, 2.0);
    let last = candles.len() - 1;
    assert_eq!(bands.upper[last], Some(100.0));
    assert_eq!(bands.middle[last], Some(100.0));
    assert_eq!(bands.lower[last], Some(100.0));
}

#[test]
fn bands_warm_up_with_the_window() {
    let candles = flat_series(20);
    let bands = calculate_bollinger_bands(&candles, 14, 2.0);
    assert!(bands.upper[..13].iter().all(|v| v.is_none()));
    assert!(bands.upper[13].is_some());
}
