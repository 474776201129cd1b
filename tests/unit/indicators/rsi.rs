use crate::helpers::candle;
use optrix::indicators::momentum::rsi::calculate_rsi;

fn closes_to_candles(closes: &[f64]) -> Vec<optrix::models::Candle> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| candle(i, c, c, c, c))
        .collect()
}

#[test]
fn warms_up_for_period_changes() {
    let candles = closes_to_candles(&[2.0, 1.0, 2.0]);
    let rsi = calculate_rsi(&candles, 2);

    assert_eq!(rsi[0], None);
    assert_eq!(rsi[1], None);
    // Weighted avg gain 2/3, avg loss 1/3 -> RS 2 -> RSI 66.67.
    let value = rsi[2].unwrap();
    assert!((value - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn undefined_when_no_losses_in_window() {
    let candles = closes_to_candles(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    let rsi = calculate_rsi(&candles, 2);
    assert!(rsi.iter().all(|v| v.is_none()));
}

#[test]
fn flat_series_stays_undefined() {
    let candles = closes_to_candles(&[5.0; 30]);
    let rsi = calculate_rsi(&candles, 14);
    assert!(rsi.iter().all(|v| v.is_none()));
}

#[test]
fn alternating_series_settles_midrange() {
    let closes: Vec<f64> = (0..40)
        .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
        .collect();
    let candles = closes_to_candles(&closes);
    let rsi = calculate_rsi(&candles, 14);
    let last = rsi.last().unwrap().unwrap();
    // Equal-magnitude gains and losses keep RSI near 50.
    assert!(last > 40.0 && last < 60.0, "rsi = {}", last);
}
