//! Prometheus metrics for the signal engine.

use prometheus::{Gauge, IntCounter, Registry};

/// Engine-level counters and gauges.
///
/// Optional everywhere it is consumed: components run identically with
/// metrics disabled.
pub struct Metrics {
    pub registry: Registry,
    pub ticks_total: IntCounter,
    pub signals_emitted_total: IntCounter,
    pub sink_errors_total: IntCounter,
    pub reconnects_total: IntCounter,
    pub analysis_errors_total: IntCounter,
    pub venue_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let ticks_total =
            IntCounter::new("engine_ticks_total", "Scheduler ticks dispatched")?;
        let signals_emitted_total = IntCounter::new(
            "engine_signals_emitted_total",
            "Signals passing the dedup gate",
        )?;
        let sink_errors_total = IntCounter::new(
            "engine_sink_errors_total",
            "Failed appends to the remote signal store",
        )?;
        let reconnects_total = IntCounter::new(
            "engine_reconnects_total",
            "Reconnect attempts issued by the session manager",
        )?;
        let analysis_errors_total = IntCounter::new(
            "engine_analysis_errors_total",
            "Per-instrument analysis tasks that failed or timed out",
        )?;
        let venue_connected =
            Gauge::new("engine_venue_connected", "1 when the venue session is up")?;

        registry.register(Box::new(ticks_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(sink_errors_total.clone()))?;
        registry.register(Box::new(reconnects_total.clone()))?;
        registry.register(Box::new(analysis_errors_total.clone()))?;
        registry.register(Box::new(venue_connected.clone()))?;

        Ok(Self {
            registry,
            ticks_total,
            signals_emitted_total,
            sink_errors_total,
            reconnects_total,
            analysis_errors_total,
            venue_connected,
        })
    }
}
