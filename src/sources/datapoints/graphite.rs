//! Graphite-style datapoint adapter
//!
//! Render queries go out over the direct-request path because the generic
//! transport's query map collapses the repeated `target` parameter.
//! Target discovery goes through the generic transport and is cached per
//! adapter type.

use super::url_builder::GraphiteUrlBuilder;
use crate::cache::TtlCache;
use crate::error::{Error, Result};
use crate::settings::Settings;
use crate::sources::DatapointSource;
use crate::transport::{DirectClient, RequestConfig, Transport};
use crate::types::{DatapointSeries, TargetQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Backend name used in classified error messages
const BACKEND_NAME: &str = "Graphite";

/// Cache key for the discovered target list. Keyed per adapter *type*:
/// every instance shares the one entry regardless of configuration.
pub const TARGET_CACHE_KEY: &str = "graphite";

/// Default cap on `available_targets` results
pub const DEFAULT_TARGET_LIMIT: usize = 200;

/// How long a discovered target list stays fresh
const TARGET_CACHE_TTL: Duration = Duration::from_secs(300);

/// Process-wide cache behind [`TARGET_CACHE_KEY`]
static TARGET_CACHE: Lazy<Arc<TtlCache<String, Vec<String>>>> =
    Lazy::new(|| Arc::new(TtlCache::new(TARGET_CACHE_TTL)));

/// Datapoint source for Graphite-style metric stores
pub struct GraphiteSource {
    endpoint: Option<String>,
    transport: Arc<dyn Transport>,
    direct: DirectClient,
    target_cache: Arc<TtlCache<String, Vec<String>>>,
}

impl GraphiteSource {
    /// Create a source reading its endpoint from `settings`, sharing the
    /// process-wide target cache
    pub fn new(settings: &Settings, transport: Arc<dyn Transport>) -> Self {
        Self::with_cache(settings, transport, Arc::clone(&TARGET_CACHE))
    }

    /// Create a source with an injected target cache
    pub fn with_cache(
        settings: &Settings,
        transport: Arc<dyn Transport>,
        target_cache: Arc<TtlCache<String, Vec<String>>>,
    ) -> Self {
        Self {
            endpoint: settings.graphite_url.clone(),
            transport,
            direct: DirectClient::new(),
            target_cache,
        }
    }

    fn url_builder(&self) -> Result<GraphiteUrlBuilder> {
        self.endpoint
            .as_deref()
            .map(GraphiteUrlBuilder::new)
            .ok_or_else(|| Error::config("graphite url is not configured"))
    }

    async fn request_datapoints(
        &self,
        targets: &[String],
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<DatapointSeries> {
        let request = self.url_builder()?.render_request(targets, from, until);
        debug!(
            "Requesting datapoints from {} with targets {:?}",
            request.url, request.params.targets
        );

        let url = request.encoded_url();
        debug!("Requesting url: {url}");

        let response = self.direct.get(&url).await?;
        match serde_json::from_str::<DatapointSeries>(&response.body) {
            Ok(series) => Ok(series),
            Err(e) => {
                error!("{BACKEND_NAME} returned an undecodable body (status {}): {e}", response.status);
                Err(Error::upstream_parse(extract_error(&response.body)))
            }
        }
    }

    async fn request_available_targets(&self) -> Result<Vec<String>> {
        let url = self.url_builder()?.metrics_url();
        debug!("Requesting available targets from {url}");

        let body = self.transport.request(&url, RequestConfig::default()).await?;
        serde_json::from_str(&body).map_err(|e| {
            Error::upstream_parse(format!("{BACKEND_NAME} target index was not valid JSON: {e}"))
        })
    }
}

impl std::fmt::Debug for GraphiteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphiteSource")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatapointSource for GraphiteSource {
    fn name(&self) -> &'static str {
        "graphite"
    }

    fn available(&self) -> bool {
        self.endpoint.is_some()
    }

    fn supports_target_browsing(&self) -> bool {
        true
    }

    fn supports_functions(&self) -> bool {
        true
    }

    async fn get(
        &self,
        targets: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<DatapointSeries> {
        let series = self.request_datapoints(targets, from, to).await?;
        if series.is_empty() {
            return Err(Error::not_found("upstream returned an empty result set"));
        }
        Ok(series)
    }

    async fn available_targets(&self, query: &TargetQuery) -> Result<Vec<String>> {
        let limit = query.limit.unwrap_or(DEFAULT_TARGET_LIMIT);

        let cached = self
            .target_cache
            .get_or_compute(TARGET_CACHE_KEY.to_string(), || {
                self.request_available_targets()
            })
            .await?;

        // Filter the full cached list first; truncating earlier would hide
        // matches beyond the unfiltered prefix.
        let mut result = match query.pattern.as_deref().filter(|p| !p.is_empty()) {
            Some(pattern) => {
                let matcher = Regex::new(pattern).map_err(|e| {
                    Error::config(format!("invalid target pattern '{pattern}': {e}"))
                })?;
                cached
                    .into_iter()
                    .filter(|target| matcher.is_match(target))
                    .collect()
            }
            None => cached,
        };

        result.truncate(limit);
        Ok(result)
    }
}

// ============================================================================
// Marker-Scan Error Classification
// ============================================================================

type MarkerFormatter = fn(&str) -> String;

/// Ordered classification rules: first matching line wins
static MARKER_RULES: Lazy<Vec<(Regex, MarkerFormatter)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r".*AssertionError.*").expect("static regex"),
            format_plain as MarkerFormatter,
        ),
        (
            Regex::new(r".*TypeError.*").expect("static regex"),
            format_plain as MarkerFormatter,
        ),
        (
            Regex::new(r".*KeyError.*").expect("static regex"),
            format_key_error as MarkerFormatter,
        ),
    ]
});

fn format_plain(marker: &str) -> String {
    format!("{BACKEND_NAME} {marker}")
}

fn format_key_error(marker: &str) -> String {
    format!(
        "{BACKEND_NAME} {marker}\nCheck if you have a typo in a function name or other syntax error"
    )
}

/// Scan an undecodable body for known upstream error markers.
///
/// Returns the formatted explanation for the first matching rule, or an
/// empty string when nothing matched.
pub(crate) fn extract_error(body: &str) -> String {
    for (pattern, formatter) in MARKER_RULES.iter() {
        if let Some(found) = pattern.find(body) {
            return formatter(found.as_str());
        }
    }

    String::new()
}
