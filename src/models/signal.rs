use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Buy,
    Sell,
}

/// A single emitted trading signal, transient between evaluation and dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalEvent {
    pub display_name: String,
    pub direction: SignalDirection,
    pub message: String,
    pub emitted_at: DateTime<Utc>,
}

impl SignalEvent {
    pub fn new(display_name: &str, direction: SignalDirection) -> Self {
        let message = match direction {
            SignalDirection::Sell => format!("{} | Sell 🔻 [Resistance zone]", display_name),
            SignalDirection::Buy => format!("{} | Buy 🔺 [Support zone]", display_name),
        };
        Self {
            display_name: display_name.to_string(),
            direction,
            message,
            emitted_at: Utc::now(),
        }
    }
}
