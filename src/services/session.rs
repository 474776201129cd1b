//! Session manager owning the single venue connection.
//!
//! All `connected`/`reconnecting` transitions happen under one lock so that
//! two tasks can never reconnect simultaneously or observe a half-updated
//! state. Reconnection is the sole recovery path and is triggered either by
//! the keepalive loop or by a connectivity-classified fetch failure.

use crate::config::AccountMode;
use crate::metrics::Metrics;
use crate::models::Candle;
use crate::services::venue::{is_connectivity_error, VenueClient};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);
const RECONNECT_BACKOFF: Duration = Duration::from_secs(5);
/// Candle buffer requested when starting a realtime stream.
const STREAM_BUFFER: usize = 100;

#[derive(Debug, Default)]
struct SessionFlags {
    connected: bool,
    reconnecting: bool,
}

pub struct SessionManager {
    venue: Arc<dyn VenueClient>,
    account_mode: AccountMode,
    flags: Mutex<SessionFlags>,
    subscriptions: Mutex<HashMap<String, u32>>,
    metrics: Option<Arc<Metrics>>,
}

impl SessionManager {
    pub fn new(
        venue: Arc<dyn VenueClient>,
        account_mode: AccountMode,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            venue,
            account_mode,
            flags: Mutex::new(SessionFlags::default()),
            subscriptions: Mutex::new(HashMap::new()),
            metrics,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.lock_flags().connected
    }

    fn lock_flags(&self) -> std::sync::MutexGuard<'_, SessionFlags> {
        self.flags
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_connected(&self, connected: bool) {
        self.lock_flags().connected = connected;
        if let Some(ref metrics) = self.metrics {
            metrics.venue_connected.set(if connected { 1.0 } else { 0.0 });
        }
    }

    /// Establish a new venue session, replacing any prior one.
    ///
    /// Single-flight: if a connect/reconnect is already in progress,
    /// concurrent callers return the current connection state without side
    /// effects. On success the account mode is selected, the instrument
    /// catalog refreshed, every subscription replayed and the keepalive loop
    /// started. On failure the session stays disconnected; the caller
    /// decides whether to retry.
    pub async fn connect(self: &Arc<Self>) -> bool {
        {
            let mut flags = self.lock_flags();
            if flags.reconnecting {
                return flags.connected;
            }
            flags.reconnecting = true;
        }

        info!("Connecting to venue...");
        self.venue.disconnect().await;

        let connected = match self.venue.connect().await {
            Ok(()) => match self.post_connect().await {
                Ok(()) => {
                    info!("Venue connection established");
                    true
                }
                Err(e) => {
                    error!(error = %e, "Venue session setup failed: {}", e);
                    false
                }
            },
            Err(e) => {
                error!(error = %e, "Venue connection failed: {}", e);
                false
            }
        };

        {
            let mut flags = self.lock_flags();
            flags.connected = connected;
            flags.reconnecting = false;
        }
        if let Some(ref metrics) = self.metrics {
            metrics.venue_connected.set(if connected { 1.0 } else { 0.0 });
        }

        if connected {
            let session = self.clone();
            tokio::spawn(async move { session.keepalive().await });
        }
        connected
    }

    async fn post_connect(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(mode = self.account_mode.as_str(), "Selecting account mode");
        self.venue.select_account(self.account_mode).await?;

        info!("Refreshing tradable-instrument catalog...");
        self.venue.refresh_catalog().await?;

        self.resubscribe_all().await;
        Ok(())
    }

    /// Replay every active stream subscription, after (re)connecting.
    async fn resubscribe_all(&self) {
        let entries: Vec<(String, u32)> = {
            let subs = self
                .subscriptions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            subs.iter().map(|(k, v)| (k.clone(), *v)).collect()
        };

        if entries.is_empty() {
            info!("No streams to re-subscribe");
            return;
        }

        info!(count = entries.len(), "Re-subscribing {} candle streams", entries.len());
        for (instrument, timeframe) in entries {
            if let Err(e) = self
                .venue
                .start_candle_stream(&instrument, timeframe, STREAM_BUFFER)
                .await
            {
                warn!(
                    instrument = %instrument,
                    error = %e,
                    "Re-subscribe failed for {}: {}",
                    instrument,
                    e
                );
            }
        }
    }

    /// Keepalive loop: probe the venue every 30 s while connected. Any probe
    /// failure marks the session disconnected and triggers a reconnect; the
    /// loop then exits (a fresh loop is spawned by the next successful
    /// connect).
    async fn keepalive(self: Arc<Self>) {
        while self.is_connected() {
            let probe = async {
                if !self.venue.check_connect().await {
                    return Err::<(), _>("Keepalive check failed: venue not connected".into());
                }
                self.venue
                    .server_time()
                    .await
                    .map(|_| ())
            }
            .await;

            if let Err(e) = probe {
                warn!(error = %e, "Keepalive failed: {}. Starting reconnect...", e);
                self.set_connected(false);
                self.reconnect().await;
                return;
            }

            sleep(KEEPALIVE_INTERVAL).await;
        }
    }

    /// Wait the fixed backoff and attempt a single reconnect. No-op when the
    /// session is already connected or another reconnect is in flight.
    pub fn reconnect(
        self: &Arc<Self>,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send + '_>> {
        Box::pin(self.reconnect_inner())
    }

    async fn reconnect_inner(self: &Arc<Self>) {
        {
            let flags = self.lock_flags();
            if flags.connected || flags.reconnecting {
                return;
            }
        }

        info!(
            "Connection lost. Reconnecting in {} seconds...",
            RECONNECT_BACKOFF.as_secs()
        );
        sleep(RECONNECT_BACKOFF).await;

        // A sibling trigger may have won the race during the backoff.
        {
            let flags = self.lock_flags();
            if flags.connected || flags.reconnecting {
                return;
            }
        }

        if let Some(ref metrics) = self.metrics {
            metrics.reconnects_total.inc();
        }
        self.connect().await;
    }

    /// Start a realtime candle stream and remember it for replay after
    /// reconnects.
    pub async fn subscribe(&self, instrument: &str, timeframe_secs: u32) {
        {
            let mut subs = self
                .subscriptions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            subs.insert(instrument.to_string(), timeframe_secs);
        }

        if !self.is_connected() {
            warn!(instrument = %instrument, "Not connected; stream will start on connect");
            return;
        }
        info!(
            instrument = %instrument,
            timeframe = timeframe_secs,
            "Starting realtime candle stream for {} ({}s)",
            instrument,
            timeframe_secs
        );
        if let Err(e) = self
            .venue
            .start_candle_stream(instrument, timeframe_secs, STREAM_BUFFER)
            .await
        {
            warn!(instrument = %instrument, error = %e, "Stream start failed: {}", e);
        }
    }

    /// Stop a stream and drop it from the subscription set.
    pub async fn unsubscribe(&self, instrument: &str, timeframe_secs: u32) {
        {
            let mut subs = self
                .subscriptions
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            subs.remove(instrument);
        }
        if let Err(e) = self.venue.stop_candle_stream(instrument, timeframe_secs).await {
            warn!(
                instrument = %instrument,
                error = %e,
                "Error stopping stream for {}: {}",
                instrument,
                e
            );
        }
    }

    /// Latest candle window for one instrument.
    ///
    /// Returns an empty series when disconnected or on any fetch failure;
    /// callers treat an empty window as a skipped tick. A connectivity-classified
    /// failure additionally marks the session disconnected and triggers a
    /// background reconnect.
    pub async fn realtime_candles(
        self: &Arc<Self>,
        instrument: &str,
        timeframe_secs: u32,
    ) -> Vec<Candle> {
        if !self.is_connected() {
            return Vec::new();
        }

        match self.venue.realtime_candles(instrument, timeframe_secs).await {
            Ok(mut candles) => {
                candles.sort_by_key(|c| c.open_time);
                candles
            }
            Err(e) => {
                if is_connectivity_error(&e) {
                    warn!(
                        instrument = %instrument,
                        error = %e,
                        "[{}] Connection lost during fetch: {}",
                        instrument,
                        e
                    );
                    self.set_connected(false);
                    let session = self.clone();
                    tokio::spawn(async move { session.reconnect().await });
                } else {
                    error!(
                        instrument = %instrument,
                        error = %e,
                        "[{}] Fetch error: {}",
                        instrument,
                        e
                    );
                }
                Vec::new()
            }
        }
    }

    /// Current balance and currency, when connected.
    pub async fn balance(&self) -> Option<(f64, String)> {
        if !self.is_connected() {
            error!("Not connected to venue");
            return None;
        }
        match self.venue.balance().await {
            Ok(balance) => Some(balance),
            Err(e) => {
                error!(error = %e, "Balance query failed: {}", e);
                None
            }
        }
    }

    pub fn venue(&self) -> &Arc<dyn VenueClient> {
        &self.venue
    }
}
