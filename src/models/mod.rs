pub mod candle;
pub mod signal;

pub use candle::{Candle, CandleColor};
pub use signal::{SignalDirection, SignalEvent};
