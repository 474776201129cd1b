use crate::helpers::{buy_series, flat_series, sell_series};
use optrix::indicators::{snapshot, IndicatorConfig, MIN_ROWS};
use optrix::models::SignalDirection;
use optrix::signals::evaluate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn rising_breakout_yields_sell_with_display_name() {
    let candles = sell_series(15);
    let snapshot = snapshot::compute(&candles, &IndicatorConfig::default());
    assert!(snapshot.len() >= MIN_ROWS);

    let event = evaluate(&candles, &snapshot, "EUR/USD (OTC)").expect("expected a SELL");
    assert_eq!(event.direction, SignalDirection::Sell);
    assert_eq!(event.message, "EUR/USD (OTC) | Sell 🔻 [Resistance zone]");
}

#[test]
fn falling_breakout_yields_buy_with_display_name() {
    let candles = buy_series(15);
    let snapshot = snapshot::compute(&candles, &IndicatorConfig::default());

    let event = evaluate(&candles, &snapshot, "EUR/USD").expect("expected a BUY");
    assert_eq!(event.direction, SignalDirection::Buy);
    assert_eq!(event.message, "EUR/USD | Buy 🔺 [Support zone]");
}

#[test]
fn flat_series_yields_no_signal_and_no_panic() {
    let candles = flat_series(40);
    let snapshot = snapshot::compute(&candles, &IndicatorConfig::default());
    assert!(evaluate(&candles, &snapshot, "EUR/USD").is_none());
}

#[test]
fn short_history_yields_no_signal() {
    let candles = sell_series(3);
    let short = &candles[..10];
    let snapshot = snapshot::compute(short, &IndicatorConfig::default());
    assert!(snapshot.len() < MIN_ROWS);
    assert!(evaluate(short, &snapshot, "EUR/USD").is_none());
}

/// Property: the geometric BUY and SELL conditions cannot both hold on the
/// same row, over synthetic random-walk price paths.
#[test]
fn buy_and_sell_conditions_are_mutually_exclusive() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mut price = 100.0_f64;
        let candles: Vec<_> = (0..60)
            .map(|i| {
                let open = price;
                let step: f64 = rng.gen_range(-1.0..1.0);
                price += step;
                let close = price;
                let wick: f64 = rng.gen_range(0.0..0.5);
                crate::helpers::candle(
                    i,
                    open,
                    open.max(close) + wick,
                    open.min(close) - wick,
                    close,
                )
            })
            .collect();

        let snap = snapshot::compute(&candles, &IndicatorConfig::default());
        let i = candles.len() - 1;
        let last = &candles[i];

        let (Some(resistance), Some(support), Some(percent_k)) =
            (snap.resistance[i], snap.support[i], snap.percent_k[i])
        else {
            continue;
        };
        let (Some(band_upper), Some(band_lower)) = (snap.band_upper[i], snap.band_lower[i])
        else {
            continue;
        };

        let mid = (resistance + support) / 2.0;
        let upper_zone = resistance - mid;
        let lower_zone = mid - support;

        let sell = upper_zone > 0.0
            && (last.high - mid) / upper_zone >= 0.9
            && snap.prev_channel_upper[i].map_or(false, |u| last.high > u)
            && last.high > band_upper
            && percent_k > 80.0
            && snap.streak[i] >= 3;
        let buy = lower_zone > 0.0
            && (mid - last.low) / lower_zone >= 0.9
            && snap.prev_channel_lower[i].map_or(false, |l| last.low < l)
            && last.low < band_lower
            && percent_k < 20.0
            && snap.streak[i] <= -3;

        assert!(!(buy && sell), "both conditions held on the same row");

        // The public evaluator must agree with the raw conditions.
        let event = evaluate(&candles, &snap, "X");
        match event.map(|e| e.direction) {
            Some(SignalDirection::Sell) => assert!(sell),
            Some(SignalDirection::Buy) => assert!(buy),
            None => assert!(!buy && !sell),
        }
    }
}
