//! Integration tests using a mock HTTP server
//!
//! Exercises the full end-to-end flow: registry → adapter → transport →
//! normalization, against wiremock backends.

use chrono::{TimeZone, Utc};
use dashwire_adk::cache::TtlCache;
use dashwire_adk::settings::Settings;
use dashwire_adk::sources::{DatapointSource, GraphiteSource, SourceRegistry};
use dashwire_adk::transport::HttpTransport;
use dashwire_adk::types::{ActivityStatus, BuildStatus, StringMap, TargetQuery};
use dashwire_adk::Error;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

fn transport() -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new())
}

/// Matches a request whose raw query string equals the expectation,
/// byte for byte. Query maps can't express this; the encoding order and
/// repeated keys are the point.
struct ExactQuery(&'static str);

impl Match for ExactQuery {
    fn matches(&self, request: &Request) -> bool {
        request.url.query() == Some(self.0)
    }
}

// ============================================================================
// CI Build Status
// ============================================================================

#[tokio::test]
async fn test_registry_jenkins_build_status_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/job/deploy-pipeline/lastBuild/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fullDisplayName": "deploy-pipeline #128",
            "result": "SUCCESS",
            "building": false,
        })))
        .mount(&mock_server)
        .await;

    let registry = SourceRegistry::builtin(&Settings::new(), transport());
    let source = registry.ci_source("jenkins").unwrap();

    let mut config = StringMap::new();
    config.insert("server_url".to_string(), mock_server.uri());
    config.insert("project".to_string(), "deploy-pipeline".to_string());

    let status = source.get(&config).await.unwrap();
    assert_eq!(status.label.as_deref(), Some("deploy-pipeline #128"));
    assert_eq!(status.last_build_status, BuildStatus::Success);
    assert_eq!(status.current_status, ActivityStatus::Idle);
}

// ============================================================================
// Datapoint Queries
// ============================================================================

#[tokio::test]
async fn test_registry_graphite_render_query_wire_format() {
    let mock_server = MockServer::start().await;

    // The exact query string the adapter must put on the wire: singly
    // encoded from/until, fixed format=json, then one target pair per
    // non-blank entry in original order.
    Mock::given(method("GET"))
        .and(path("/render"))
        .and(ExactQuery(
            "from=09%3A15_20260804&until=10%3A45_20260804&format=json\
             &target=cpu.load&target=mem.free",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"target": "cpu.load", "datapoints": [[0.25, 1786007700]]},
            {"target": "mem.free", "datapoints": [[1024.0, 1786007700]]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = Settings::with_graphite_url(mock_server.uri());
    let registry = SourceRegistry::builtin(&settings, transport());
    let source = registry.datapoint_source("graphite").unwrap();

    let targets = vec![
        "cpu.load".to_string(),
        "   ".to_string(),
        "mem.free".to_string(),
    ];
    let from = Utc.with_ymd_and_hms(2026, 8, 4, 9, 15, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2026, 8, 4, 10, 45, 0).unwrap();

    let series = source.get(&targets, from, to).await.unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].target, "cpu.load");
    assert_eq!(series[1].target, "mem.free");
}

#[tokio::test]
async fn test_graphite_applies_endpoint_credentials() {
    let mock_server = MockServer::start().await;

    // base64("dash:board")
    Mock::given(method("GET"))
        .and(path("/render"))
        .and(header("Authorization", "Basic ZGFzaDpib2FyZA=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"target": "cpu.load", "datapoints": [[0.5, 1786007700]]}
        ])))
        .mount(&mock_server)
        .await;

    let endpoint = mock_server.uri().replacen("http://", "http://dash:board@", 1);
    let source = GraphiteSource::with_cache(
        &Settings::with_graphite_url(endpoint),
        transport(),
        Arc::new(TtlCache::new(Duration::from_secs(60))),
    );

    let from = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2026, 8, 4, 10, 0, 0).unwrap();

    let series = source.get(&["cpu.load".to_string()], from, to).await.unwrap();
    assert_eq!(series[0].target, "cpu.load");
}

#[tokio::test]
async fn test_graphite_empty_result_set_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let settings = Settings::with_graphite_url(mock_server.uri());
    let registry = SourceRegistry::builtin(&settings, transport());
    let source = registry.datapoint_source("graphite").unwrap();

    let from = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2026, 8, 4, 10, 0, 0).unwrap();

    let err = source
        .get(&["cpu.load".to_string()], from, to)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_graphite_classifies_upstream_traceback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/render"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            "Traceback (most recent call last):\n  ...\nKeyError: 'sumSerie'\n",
        ))
        .mount(&mock_server)
        .await;

    let settings = Settings::with_graphite_url(mock_server.uri());
    let registry = SourceRegistry::builtin(&settings, transport());
    let source = registry.datapoint_source("graphite").unwrap();

    let from = Utc.with_ymd_and_hms(2026, 8, 4, 9, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2026, 8, 4, 10, 0, 0).unwrap();

    let err = source
        .get(&["sumSerie(cpu.load)".to_string()], from, to)
        .await
        .unwrap_err();

    match err {
        Error::UpstreamParse { message } => {
            assert!(message.starts_with("Graphite KeyError: 'sumSerie'"));
            assert!(message.contains("typo in a function name"));
        }
        other => panic!("expected UpstreamParse, got {other:?}"),
    }
}

// ============================================================================
// Target Discovery
// ============================================================================

#[tokio::test]
async fn test_graphite_discovery_cached_and_filtered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/metrics/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "carbon.agents.a.cpuUsage",
            "cpu.load.shortterm",
            "mem.free",
            "cpu.load.longterm"
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = GraphiteSource::with_cache(
        &Settings::with_graphite_url(mock_server.uri()),
        transport(),
        Arc::new(TtlCache::new(Duration::from_secs(60))),
    );

    let all = source.available_targets(&TargetQuery::new()).await.unwrap();
    assert_eq!(all.len(), 4);

    // Second call is served from the cache; expect(1) verifies exactly
    // one discovery request was made.
    let filtered = source
        .available_targets(&TargetQuery::new().pattern("cpu.load").limit(1))
        .await
        .unwrap();
    assert_eq!(filtered, vec!["cpu.load.shortterm"]);
}

// ============================================================================
// Capability Probing
// ============================================================================

#[tokio::test]
async fn test_unconfigured_graphite_is_not_browsable() {
    let registry = SourceRegistry::builtin(&Settings::new(), transport());

    let source = registry.datapoint_source("graphite").unwrap();
    assert!(!source.available());
    assert!(registry.browsable_datapoint_sources().is_empty());

    let err = source
        .available_targets(&TargetQuery::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
