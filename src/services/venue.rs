//! Trading-venue capability interface.
//!
//! The engine consumes the venue as an opaque capability; this trait is the
//! seam that lets a simulated implementation stand in for a live connection.

use crate::config::{AccountMode, ScanMode};
use crate::models::Candle;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type VenueError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait VenueClient: Send + Sync {
    /// Establish a fresh connection. Implementations replace any prior
    /// session state.
    async fn connect(&self) -> Result<(), VenueError>;

    async fn disconnect(&self);

    /// Select the account/balance mode after connecting.
    async fn select_account(&self, mode: AccountMode) -> Result<(), VenueError>;

    /// Refresh the tradable-instrument catalog held by the venue.
    async fn refresh_catalog(&self) -> Result<(), VenueError>;

    /// Instruments currently open for trading in the given segment.
    async fn open_instruments(&self, mode: ScanMode) -> Result<Vec<String>, VenueError>;

    async fn server_time(&self) -> Result<DateTime<Utc>, VenueError>;

    /// Current balance and its currency code.
    async fn balance(&self) -> Result<(f64, String), VenueError>;

    async fn historical_candles(
        &self,
        instrument: &str,
        timeframe_secs: u32,
        count: usize,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, VenueError>;

    async fn start_candle_stream(
        &self,
        instrument: &str,
        timeframe_secs: u32,
        buffer: usize,
    ) -> Result<(), VenueError>;

    async fn stop_candle_stream(
        &self,
        instrument: &str,
        timeframe_secs: u32,
    ) -> Result<(), VenueError>;

    /// Latest candle window from an active stream, ordered by open time.
    async fn realtime_candles(
        &self,
        instrument: &str,
        timeframe_secs: u32,
    ) -> Result<Vec<Candle>, VenueError>;

    /// Lightweight liveness probe.
    async fn check_connect(&self) -> bool;
}

/// Whether a venue failure looks like a lost connection (recoverable by
/// reconnect) rather than a per-call error.
pub fn is_connectivity_error(err: &VenueError) -> bool {
    let text = err.to_string().to_ascii_lowercase();
    text.contains("connection") || text.contains("closed") || text.contains("socket")
}
