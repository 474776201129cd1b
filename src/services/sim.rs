//! Simulated venue client.
//!
//! Deterministic random-walk candles derived from the wall clock, so the
//! engine can run end-to-end without a live venue. Each (instrument, candle
//! index) pair always produces the same candle, which keeps successive
//! realtime windows consistent with each other.

use crate::config::{AccountMode, ScanMode};
use crate::models::Candle;
use crate::services::venue::{VenueClient, VenueError};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

pub struct SimulatedVenue {
    instruments: Vec<String>,
    seed: u64,
    connected: Mutex<bool>,
    streams: Mutex<HashSet<(String, u32)>>,
}

impl SimulatedVenue {
    pub fn new(instruments: Vec<String>) -> Self {
        Self {
            instruments,
            seed: 0x5eed,
            connected: Mutex::new(false),
            streams: Mutex::new(HashSet::new()),
        }
    }

    fn is_up(&self) -> bool {
        *self.connected.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn price_at(&self, instrument: &str, index: i64) -> f64 {
        let mut hasher = DefaultHasher::new();
        instrument.hash(&mut hasher);
        let instrument_seed = hasher.finish();

        let mut rng = StdRng::seed_from_u64(self.seed ^ instrument_seed ^ index as u64);
        let wave = (index as f64 * 0.07).sin() * 0.05;
        let noise: f64 = rng.gen_range(-0.004..0.004);
        1.0 + wave + noise
    }

    fn candle_at(&self, instrument: &str, timeframe_secs: u32, index: i64) -> Candle {
        let open = self.price_at(instrument, index);
        let close = self.price_at(instrument, index + 1);
        let mut hasher = DefaultHasher::new();
        (instrument, index).hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(self.seed ^ hasher.finish());
        let wick: f64 = rng.gen_range(0.0..0.002);

        let open_time = Utc
            .timestamp_opt(index * timeframe_secs as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Candle::new(
            open_time,
            open,
            open.max(close) + wick,
            open.min(close) - wick,
            close,
        )
    }

    fn window(
        &self,
        instrument: &str,
        timeframe_secs: u32,
        count: usize,
        end: DateTime<Utc>,
    ) -> Vec<Candle> {
        let last_index = end.timestamp() / timeframe_secs as i64;
        let first_index = last_index - count as i64 + 1;
        (first_index..=last_index)
            .filter(|i| *i >= 0)
            .map(|i| self.candle_at(instrument, timeframe_secs, i))
            .collect()
    }
}

#[async_trait]
impl VenueClient for SimulatedVenue {
    async fn connect(&self) -> Result<(), VenueError> {
        *self.connected.lock().unwrap_or_else(|p| p.into_inner()) = true;
        Ok(())
    }

    async fn disconnect(&self) {
        *self.connected.lock().unwrap_or_else(|p| p.into_inner()) = false;
    }

    async fn select_account(&self, _mode: AccountMode) -> Result<(), VenueError> {
        Ok(())
    }

    async fn refresh_catalog(&self) -> Result<(), VenueError> {
        Ok(())
    }

    async fn open_instruments(&self, _mode: ScanMode) -> Result<Vec<String>, VenueError> {
        Ok(self.instruments.clone())
    }

    async fn server_time(&self) -> Result<DateTime<Utc>, VenueError> {
        if !self.is_up() {
            return Err("connection closed".into());
        }
        Ok(Utc::now())
    }

    async fn balance(&self) -> Result<(f64, String), VenueError> {
        Ok((10_000.0, "USD".to_string()))
    }

    async fn historical_candles(
        &self,
        instrument: &str,
        timeframe_secs: u32,
        count: usize,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, VenueError> {
        if !self.is_up() {
            return Err("connection closed".into());
        }
        Ok(self.window(instrument, timeframe_secs, count, end))
    }

    async fn start_candle_stream(
        &self,
        instrument: &str,
        timeframe_secs: u32,
        _buffer: usize,
    ) -> Result<(), VenueError> {
        let mut streams = self.streams.lock().unwrap_or_else(|p| p.into_inner());
        streams.insert((instrument.to_string(), timeframe_secs));
        Ok(())
    }

    async fn stop_candle_stream(
        &self,
        instrument: &str,
        timeframe_secs: u32,
    ) -> Result<(), VenueError> {
        let mut streams = self.streams.lock().unwrap_or_else(|p| p.into_inner());
        streams.remove(&(instrument.to_string(), timeframe_secs));
        Ok(())
    }

    async fn realtime_candles(
        &self,
        instrument: &str,
        timeframe_secs: u32,
    ) -> Result<Vec<Candle>, VenueError> {
        if !self.is_up() {
            return Err("socket closed".into());
        }
        {
            let streams = self.streams.lock().unwrap_or_else(|p| p.into_inner());
            if !streams.contains(&(instrument.to_string(), timeframe_secs)) {
                return Err(format!("no active stream for {}", instrument).into());
            }
        }
        Ok(self.window(instrument, timeframe_secs, 100, Utc::now()))
    }

    async fn check_connect(&self) -> bool {
        self.is_up()
    }
}
