//! Consecutive candle-color streak
//!
//! Signed run length of same-color candles: positive while green candles
//! repeat, negative while red candles repeat. A doji resets the streak to 0
//! and breaks any continuation.

use crate::models::{Candle, CandleColor};

/// Calculate the signed consecutive-color streak per candle.
pub fn calculate_streak(candles: &[Candle]) -> Vec<i32> {
    let mut out = Vec::with_capacity(candles.len());
    let mut current: i32 = 0;

    for (i, candle) in candles.iter().enumerate() {
        let color = candle.color();
        let continues =
            i > 0 && color != CandleColor::Doji && color == candles[i - 1].color();

        current = if continues {
            match color {
                CandleColor::Green => current.abs() + 1,
                CandleColor::Red => -(current.abs() + 1),
                CandleColor::Doji => unreachable!(),
            }
        } else {
            match color {
                CandleColor::Green => 1,
                CandleColor::Red => -1,
                CandleColor::Doji => 0,
            }
        };
        out.push(current);
    }

    out
}
