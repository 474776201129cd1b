//! Signal engine bootstrap.
//!
//! Loads configuration and the instrument catalog, connects the venue
//! session, starts realtime streams and runs the candle-aligned scheduler
//! until interrupted.

use dotenvy::dotenv;
use optrix::assets::AssetCatalog;
use optrix::config::Config;
use optrix::core::context::EngineContext;
use optrix::core::scheduler::Scheduler;
use optrix::indicators::IndicatorConfig;
use optrix::logging;
use optrix::metrics::Metrics;
use optrix::services::session::SessionManager;
use optrix::services::sim::SimulatedVenue;
use optrix::services::sink::{HttpSink, SinkDispatcher};
use optrix::services::venue::VenueClient;
use optrix::signals::DedupRegistry;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    logging::init_logging();

    let config = Config::from_env()?;
    info!(
        timeframe = config.timeframe_secs,
        mode = ?config.scan_mode,
        "Starting signal engine"
    );

    // Fatal when absent or malformed; signals cannot be named without it.
    let catalog = Arc::new(AssetCatalog::load(&config.asset_file)?);
    info!(instruments = catalog.len(), "Loaded instrument catalog");

    let metrics = match Metrics::new() {
        Ok(m) => Some(Arc::new(m)),
        Err(e) => {
            warn!(error = %e, "Metrics disabled: {}", e);
            None
        }
    };

    let scoped = catalog.instruments_for(config.scan_mode);
    // The venue client is an external capability; the simulated venue stands
    // in behind the same trait.
    let venue: Arc<dyn VenueClient> = Arc::new(SimulatedVenue::new(scoped.clone()));

    let session = Arc::new(SessionManager::new(
        venue.clone(),
        config.account_mode,
        metrics.clone(),
    ));
    if !session.connect().await {
        return Err("Unable to connect to venue at startup".into());
    }

    if let Some((balance, currency)) = session.balance().await {
        info!(balance, currency = %currency, "Starting balance: {:.2} {}", balance, currency);
    }

    info!("Checking which instruments are open for trading...");
    let open = venue.open_instruments(config.scan_mode).await?;
    let instruments: Vec<String> = scoped
        .into_iter()
        .filter(|i| open.contains(i))
        .collect();
    if instruments.is_empty() {
        warn!("No instruments currently open for trading, exiting");
        return Err("No instruments open for trading".into());
    }
    info!(
        count = instruments.len(),
        "Analyzing instruments: {:?}",
        instruments
    );

    for instrument in &instruments {
        session.subscribe(instrument, config.timeframe_secs).await;
    }

    let sink = Arc::new(HttpSink::new(config.sink_url.clone()));
    let dispatcher = Arc::new(SinkDispatcher::new(
        sink,
        config.timeframe_secs,
        config.scan_mode,
        metrics.clone(),
    ));

    let ctx = Arc::new(EngineContext {
        session: session.clone(),
        catalog,
        dedup: Arc::new(DedupRegistry::new()),
        dispatcher,
        metrics,
        timeframe_secs: config.timeframe_secs,
        candle_count: config.candle_count,
        indicator_config: IndicatorConfig::default(),
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down after the current batch");
            let _ = shutdown_tx.send(true);
        }
    });

    Scheduler::new(ctx, instruments, config.refresh_interval_minutes)
        .run(shutdown_rx)
        .await;

    venue.disconnect().await;
    info!("Signal engine stopped");
    Ok(())
}
