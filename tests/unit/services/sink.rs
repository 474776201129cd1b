use optrix::config::ScanMode;
use optrix::models::{SignalDirection, SignalEvent};
use optrix::services::sink::{HttpSink, SignalDocument, SignalSink, SinkDispatcher};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn append_document_posts_to_the_partition_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Signal5MOtc/1700000000000"))
        .and(body_json(json!({
            "message": "EUR/USD (OTC) | Sell 🔻 [Resistance zone]"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let sink = HttpSink::new(server.uri());
    let doc = SignalDocument {
        message: "EUR/USD (OTC) | Sell 🔻 [Resistance zone]".to_string(),
    };
    sink.append_document("Signal5MOtc", "1700000000000", &doc)
        .await
        .expect("append should succeed");
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let sink = HttpSink::new(server.uri());
    let doc = SignalDocument {
        message: "x".to_string(),
    };
    let err = sink
        .append_document("Signal5M", "1", &doc)
        .await
        .expect_err("500 must surface as an error");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn dispatcher_swallows_sink_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sink = Arc::new(HttpSink::new(server.uri()));
    let dispatcher = SinkDispatcher::new(sink, 300, ScanMode::Otc, None);
    let event = SignalEvent::new("EUR/USD (OTC)", SignalDirection::Sell);

    // Must not panic or propagate.
    dispatcher.dispatch(&event).await;
}

#[tokio::test]
async fn dispatcher_drops_events_without_a_partition() {
    let server = MockServer::start().await;
    // No mock mounted: any request would 404 and fail `expect`, but none
    // should be sent for an unmapped timeframe.
    let sink = Arc::new(HttpSink::new(server.uri()));
    let dispatcher = SinkDispatcher::new(sink, 900, ScanMode::Otc, None);
    let event = SignalEvent::new("EUR/USD", SignalDirection::Buy);

    dispatcher.dispatch(&event).await;
    assert!(server.received_requests().await.unwrap().is_empty());
}
