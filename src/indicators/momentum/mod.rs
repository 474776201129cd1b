pub mod rsi;
pub mod stochastic;
pub mod streak;
