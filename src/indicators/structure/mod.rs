pub mod donchian;
pub mod support_resistance;
