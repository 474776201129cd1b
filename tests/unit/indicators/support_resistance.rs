use crate::helpers::candle;
use optrix::indicators::structure::support_resistance::calculate_support_resistance;

#[test]
fn levels_warm_up_with_the_window() {
    let candles = vec![
        candle(0, 0.5, 1.0, 0.0, 0.5),
        candle(1, 1.5, 2.0, 1.0, 1.5),
        candle(2, 2.5, 3.0, 2.0, 2.5),
    ];
    let sr = calculate_support_resistance(&candles, 3);
    assert_eq!(sr.resistance, vec![None, None, Some(3.0)]);
    // Rising lows never touch the rolling minimum, so no support point yet.
    assert_eq!(sr.support, vec![None, None, None]);
}

#[test]
fn levels_are_forward_filled_between_points() {
    let candles = vec![
        candle(0, 0.5, 1.0, 0.0, 0.5),
        candle(1, 1.5, 2.0, 1.0, 1.5),
        candle(2, 2.5, 3.0, 2.0, 2.5),
        candle(3, 1.5, 2.0, 1.0, 1.5),
        candle(4, 0.5, 1.0, 0.0, 0.5),
    ];
    let sr = calculate_support_resistance(&candles, 3);

    // High of 3.0 at index 2 is carried forward once highs fall away.
    assert_eq!(sr.resistance[2], Some(3.0));
    assert_eq!(sr.resistance[3], Some(3.0));
    assert_eq!(sr.resistance[4], Some(3.0));

    // Lows of 1.0 and 0.0 set new support points on the way down.
    assert_eq!(sr.support[3], Some(1.0));
    assert_eq!(sr.support[4], Some(0.0));
}

#[test]
fn columns_align_with_the_source_series() {
    let candles: Vec<_> = (0..30).map(|i| candle(i, 1.0, 2.0, 0.5, 1.5)).collect();
    let sr = calculate_support_resistance(&candles, 25);
    assert_eq!(sr.resistance.len(), candles.len());
    assert_eq!(sr.support.len(), candles.len());
}
