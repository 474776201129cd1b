use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a candle body by close vs. open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleColor {
    Green,
    Red,
    Doji,
}

/// Fixed-interval OHLC price summary.
///
/// The most recent candle in a realtime series may still be open (mutable at
/// the venue) until its boundary passes; everything before it is immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open_time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
        }
    }

    pub fn color(&self) -> CandleColor {
        if self.close > self.open {
            CandleColor::Green
        } else if self.close < self.open {
            CandleColor::Red
        } else {
            CandleColor::Doji
        }
    }
}
