//! Per-instrument, per-candle emission deduplication.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records the open timestamp of the last candle a signal was emitted for,
/// one entry per instrument. Entries are overwritten on emission and never
/// removed during a run. A single lock serializes all workers; per-tick
/// volume is low enough that contention is negligible.
#[derive(Debug, Default)]
pub struct DedupRegistry {
    last_emitted: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl DedupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically compare the candidate candle timestamp against the last
    /// recorded emission for this instrument. Returns `false` when a signal
    /// was already emitted for this candle; otherwise records the timestamp
    /// and returns `true`.
    ///
    /// The entry is recorded before any dispatch attempt and is not rolled
    /// back on dispatch failure (at-most-once emission).
    pub fn check_and_record(&self, instrument: &str, candle_time: DateTime<Utc>) -> bool {
        let mut map = self
            .last_emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if map.get(instrument) == Some(&candle_time) {
            return false;
        }
        map.insert(instrument.to_string(), candle_time);
        true
    }
}
