use crate::helpers::candle;
use optrix::indicators::structure::donchian::calculate_donchian;

#[test]
fn channel_tracks_rolling_extremes() {
    let candles = vec![
        candle(0, 0.5, 1.0, 0.0, 0.5),
        candle(1, 2.0, 3.0, 1.0, 2.0),
        candle(2, 1.5, 2.0, 1.0, 1.5),
    ];
    let channel = calculate_donchian(&candles, 2);

    assert_eq!(channel.upper, vec![None, Some(3.0), Some(3.0)]);
    assert_eq!(channel.lower, vec![None, Some(0.0), Some(1.0)]);
    assert_eq!(channel.middle, vec![None, Some(1.5), Some(2.0)]);
}

#[test]
fn shorter_series_than_window_is_all_undefined() {
    let candles = vec![candle(0, 1.0, 2.0, 0.5, 1.5)];
    let channel = calculate_donchian(&candles, 20);
    assert_eq!(channel.upper, vec![None]);
    assert_eq!(channel.middle, vec![None]);
    assert_eq!(channel.lower, vec![None]);
}
