//! Engine context for dependency injection.

use crate::assets::AssetCatalog;
use crate::indicators::IndicatorConfig;
use crate::metrics::Metrics;
use crate::services::session::SessionManager;
use crate::services::sink::SinkDispatcher;
use crate::signals::DedupRegistry;
use std::sync::Arc;

/// Shared dependencies handed to every analysis task.
///
/// The session manager owns the venue connection; tasks only read from it.
/// The dedup registry is the sole other cross-task mutable structure.
pub struct EngineContext {
    pub session: Arc<SessionManager>,
    pub catalog: Arc<AssetCatalog>,
    pub dedup: Arc<DedupRegistry>,
    pub dispatcher: Arc<SinkDispatcher>,
    pub metrics: Option<Arc<Metrics>>,
    pub timeframe_secs: u32,
    pub candle_count: usize,
    pub indicator_config: IndicatorConfig,
}
