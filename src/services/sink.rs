//! Remote signal store: append-document capability and dispatcher.

use crate::config::ScanMode;
use crate::metrics::Metrics;
use crate::models::SignalEvent;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Document appended to the remote store. The store assigns the creation
/// timestamp server-side.
#[derive(Debug, Clone, Serialize)]
pub struct SignalDocument {
    pub message: String,
}

/// Opaque append-document capability.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn append_document(
        &self,
        partition: &str,
        doc_id: &str,
        doc: &SignalDocument,
    ) -> Result<(), SinkError>;
}

/// HTTP implementation: `POST {base}/{partition}/{doc_id}` with a JSON body.
pub struct HttpSink {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSink {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SignalSink for HttpSink {
    async fn append_document(
        &self,
        partition: &str,
        doc_id: &str,
        doc: &SignalDocument,
    ) -> Result<(), SinkError> {
        let url = format!("{}/{}/{}", self.base_url, partition, doc_id);
        let response = self.client.post(&url).json(doc).send().await?;
        if !response.status().is_success() {
            return Err(format!("Sink returned status {}", response.status()).into());
        }
        Ok(())
    }
}

/// Destination partition for a (timeframe, segment mode) pair. `None` for
/// combinations without a configured partition.
pub fn partition_for(timeframe_secs: u32, mode: ScanMode) -> Option<&'static str> {
    match (timeframe_secs, mode) {
        (60, ScanMode::Otc) => Some("Signal1MOtc"),
        (60, _) => Some("Signal1M"),
        (300, ScanMode::Otc) => Some("Signal5MOtc"),
        (300, _) => Some("Signal5M"),
        _ => None,
    }
}

/// Serializes signal events and appends them to the remote store.
///
/// Dispatch failures are logged and swallowed; a lost occurrence must never
/// crash the analysis task or block sibling instruments.
pub struct SinkDispatcher {
    sink: Arc<dyn SignalSink>,
    timeframe_secs: u32,
    scan_mode: ScanMode,
    metrics: Option<Arc<Metrics>>,
}

impl SinkDispatcher {
    pub fn new(
        sink: Arc<dyn SignalSink>,
        timeframe_secs: u32,
        scan_mode: ScanMode,
        metrics: Option<Arc<Metrics>>,
    ) -> Self {
        Self {
            sink,
            timeframe_secs,
            scan_mode,
            metrics,
        }
    }

    pub async fn dispatch(&self, event: &SignalEvent) {
        let Some(partition) = partition_for(self.timeframe_secs, self.scan_mode) else {
            warn!(
                timeframe = self.timeframe_secs,
                mode = ?self.scan_mode,
                "No signal partition for mode {:?} and timeframe {}s",
                self.scan_mode,
                self.timeframe_secs
            );
            return;
        };

        let doc_id = event.emitted_at.timestamp_millis().to_string();
        let doc = SignalDocument {
            message: event.message.clone(),
        };

        match self.sink.append_document(partition, &doc_id, &doc).await {
            Ok(()) => {
                info!(
                    instrument = %event.display_name,
                    partition = partition,
                    doc_id = %doc_id,
                    "[{}] Signal delivered to store (ID: {})",
                    event.display_name,
                    doc_id
                );
            }
            Err(e) => {
                if let Some(ref metrics) = self.metrics {
                    metrics.sink_errors_total.inc();
                }
                error!(
                    instrument = %event.display_name,
                    partition = partition,
                    error = %e,
                    "[{}] Failed to deliver signal: {}",
                    event.display_name,
                    e
                );
            }
        }
    }
}
