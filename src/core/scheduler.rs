//! Candle-boundary-aligned scheduler.
//!
//! Blocks until the wall clock reaches the start of the next candle of the
//! configured timeframe, then fans out one analysis task per subscribed
//! instrument to a bounded worker pool, every timeframe interval.

use crate::core::analyzer::analyze_instrument;
use crate::core::context::EngineContext;
use chrono::{DateTime, Utc};
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{watch, Semaphore};
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, error, info, warn};

/// Per-task await budget; a slower task is abandoned and logged.
const TASK_TIMEOUT: Duration = Duration::from_secs(20);
/// Alignment polling resolution.
const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Wait before retrying a tick while the session is disconnected.
const DISCONNECTED_RETRY: Duration = Duration::from_secs(5);

/// First candle-start boundary strictly after `now`.
pub fn next_boundary(now: DateTime<Utc>, timeframe_secs: u32) -> DateTime<Utc> {
    let tf = timeframe_secs as i64;
    let next = (now.timestamp().div_euclid(tf) + 1) * tf;
    DateTime::from_timestamp(next, 0).unwrap_or(now)
}

/// Whether `now` sits exactly on a candle-start boundary (second
/// granularity).
pub fn at_boundary(now: DateTime<Utc>, timeframe_secs: u32) -> bool {
    now.timestamp() % timeframe_secs as i64 == 0
}

pub struct Scheduler {
    ctx: Arc<EngineContext>,
    instruments: Vec<String>,
    refresh_interval_minutes: u32,
}

impl Scheduler {
    pub fn new(
        ctx: Arc<EngineContext>,
        instruments: Vec<String>,
        refresh_interval_minutes: u32,
    ) -> Self {
        Self {
            ctx,
            instruments,
            refresh_interval_minutes,
        }
    }

    /// Run until the shutdown channel flips. The in-flight batch always
    /// completes before the loop exits.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let timeframe_secs = self.ctx.timeframe_secs;
        info!(
            timeframe = timeframe_secs,
            instruments = self.instruments.len(),
            "Synchronizing to the next {}-minute candle boundary...",
            timeframe_secs / 60
        );

        if !at_boundary(Utc::now(), timeframe_secs)
            && !self
                .wait_until(next_boundary(Utc::now(), timeframe_secs), &mut shutdown)
                .await
        {
            return;
        }
        info!("Boundary reached, starting analysis");

        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        let pool_size = self.instruments.len().max(1).min(parallelism * 2);
        let semaphore = Arc::new(Semaphore::new(pool_size));
        info!(pool_size, "Worker pool sized to {}", pool_size);

        let mut last_refresh_minute: i64 = -1;

        loop {
            if *shutdown.borrow() {
                info!("Shutdown requested, scheduler stopping");
                return;
            }

            let now = Utc::now();
            if self.refresh_due(now, &mut last_refresh_minute) {
                self.mark_refresh_due(now);
            }

            if !self.run_tick(&semaphore).await {
                continue;
            }

            if !self
                .wait_until(next_boundary(Utc::now(), timeframe_secs), &mut shutdown)
                .await
            {
                info!("Shutdown requested, scheduler stopping");
                return;
            }
        }
    }

    /// One scheduler tick. While the session is disconnected, waits briefly
    /// and returns `false` without submitting any tasks; otherwise fans the
    /// batch out and returns `true` once every task completed or timed out.
    pub async fn run_tick(&self, semaphore: &Arc<Semaphore>) -> bool {
        if !self.ctx.session.is_connected() {
            info!("Waiting for reconnection...");
            sleep(DISCONNECTED_RETRY).await;
            return false;
        }

        if let Some(ref metrics) = self.ctx.metrics {
            metrics.ticks_total.inc();
        }
        self.dispatch_batch(semaphore).await;
        true
    }

    /// Fan out one task per instrument and await completions as they land.
    /// A timeout or panic in one task never aborts its siblings.
    async fn dispatch_batch(&self, semaphore: &Arc<Semaphore>) {
        let mut batch = FuturesUnordered::new();

        for instrument in &self.instruments {
            let ctx = self.ctx.clone();
            let sem = semaphore.clone();
            let name = instrument.clone();
            let task_name = instrument.clone();

            let handle = tokio::spawn(async move {
                let _permit = sem.acquire_owned().await;
                analyze_instrument(ctx, task_name).await;
            });
            batch.push(async move { (name, timeout(TASK_TIMEOUT, handle).await) });
        }

        while let Some((instrument, result)) = batch.next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(join_err)) => {
                    if let Some(ref metrics) = self.ctx.metrics {
                        metrics.analysis_errors_total.inc();
                    }
                    error!(
                        instrument = %instrument,
                        error = %join_err,
                        "[{}] Analysis task failed: {}",
                        instrument,
                        join_err
                    );
                }
                Err(_elapsed) => {
                    if let Some(ref metrics) = self.ctx.metrics {
                        metrics.analysis_errors_total.inc();
                    }
                    // The task keeps running detached; its eventual side
                    // effects are not waited on.
                    warn!(
                        instrument = %instrument,
                        timeout_secs = TASK_TIMEOUT.as_secs(),
                        "[{}] Analysis task exceeded {}s, abandoning",
                        instrument,
                        TASK_TIMEOUT.as_secs()
                    );
                }
            }
        }
    }

    fn refresh_due(&self, now: DateTime<Utc>, last_refresh_minute: &mut i64) -> bool {
        if self.refresh_interval_minutes == 0 {
            return false;
        }
        let minute = now.timestamp() / 60;
        let due = minute % self.refresh_interval_minutes as i64 == 0
            && minute != *last_refresh_minute;
        if due {
            *last_refresh_minute = minute;
        }
        due
    }

    /// Hook point for a mid-run instrument-list refresh. The open-instrument
    /// membership is currently fixed at startup; this only marks that a
    /// refresh would be due.
    fn mark_refresh_due(&self, now: DateTime<Utc>) {
        info!(
            at = %now.format("%H:%M"),
            "Instrument list refresh due ({})",
            now.format("%H:%M")
        );
    }

    /// Cooperative 1-second polling until `target`. Returns `false` when
    /// shutdown was requested while waiting.
    async fn wait_until(
        &self,
        target: DateTime<Utc>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> bool {
        loop {
            if *shutdown.borrow() {
                return false;
            }
            let now = Utc::now();
            if now >= target {
                return true;
            }
            debug!(
                remaining_secs = (target - now).num_seconds(),
                "Waiting for next candle boundary"
            );
            tokio::select! {
                _ = sleep(POLL_INTERVAL) => {}
                _ = shutdown.changed() => {}
            }
        }
    }
}
