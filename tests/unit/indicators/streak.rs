use crate::helpers::candle;
use optrix::indicators::momentum::streak::calculate_streak;
use optrix::models::Candle;

fn green(i: usize) -> Candle {
    candle(i, 1.0, 2.5, 0.9, 2.0)
}

fn red(i: usize) -> Candle {
    candle(i, 2.0, 2.1, 0.5, 1.0)
}

fn doji(i: usize) -> Candle {
    candle(i, 1.5, 1.6, 1.4, 1.5)
}

#[test]
fn streak_counts_consecutive_colors_with_sign() {
    let candles = vec![green(0), green(1), red(2), red(3), red(4)];
    assert_eq!(calculate_streak(&candles), vec![1, 2, -1, -2, -3]);
}

#[test]
fn doji_resets_and_breaks_continuation() {
    let candles = vec![green(0), green(1), doji(2), green(3), green(4)];
    assert_eq!(calculate_streak(&candles), vec![1, 2, 0, 1, 2]);
}

#[test]
fn color_change_restarts_at_one() {
    let candles = vec![red(0), red(1), green(2), red(3)];
    assert_eq!(calculate_streak(&candles), vec![-1, -2, 1, -1]);
}
