//! Graphite URL construction
//!
//! Pure request descriptors, no I/O. The render query carries a repeated
//! `target` parameter; naive query encoders collapse repeated keys, so
//! [`RenderRequest`] serializes its own query string with one discrete
//! `target=<value>` pair per series.

use chrono::{DateTime, Utc};
use url::form_urlencoded;

/// Graphite's timestamp format for `from`/`until`
const TIME_FORMAT: &str = "%H:%M_%Y%m%d";

/// Builds request descriptors against one Graphite base endpoint
#[derive(Debug, Clone)]
pub struct GraphiteUrlBuilder {
    base_url: String,
}

impl GraphiteUrlBuilder {
    /// Create a builder for the given base endpoint
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Descriptor for a datapoint query over `[from, until]`
    pub fn render_request(
        &self,
        targets: &[String],
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> RenderRequest {
        RenderRequest {
            url: format!("{}/render", self.base_url),
            params: RenderParams {
                targets: targets.to_vec(),
                from: from.format(TIME_FORMAT).to_string(),
                until: until.format(TIME_FORMAT).to_string(),
            },
        }
    }

    /// URL of the full target index
    pub fn metrics_url(&self) -> String {
        format!("{}/metrics/index.json", self.base_url)
    }
}

/// Query parameters of a render request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    /// Target expressions, one repeated `target` pair each
    pub targets: Vec<String>,
    /// Start of the range, formatted for the backend
    pub from: String,
    /// End of the range, formatted for the backend
    pub until: String,
}

/// A render request descriptor: base URL plus parameter map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Base URL without query string
    pub url: String,
    /// Query parameters, serialized by [`query_string`](Self::query_string)
    pub params: RenderParams,
}

impl RenderRequest {
    /// Serialize the query string by hand.
    ///
    /// Blank target entries are dropped; the remaining ones become one
    /// `target=<value>` pair each, in their original order, after the
    /// singly-encoded `from`/`until` and a fixed `format=json`.
    pub fn query_string(&self) -> String {
        let mut parts = vec![
            format!("from={}", escape(&self.params.from)),
            format!("until={}", escape(&self.params.until)),
            "format=json".to_string(),
        ];

        parts.extend(
            self.params
                .targets
                .iter()
                .filter(|target| !target.trim().is_empty())
                .map(|target| format!("target={}", escape(target))),
        );

        parts.join("&")
    }

    /// The fully assembled URL, ready for the direct-request path
    pub fn encoded_url(&self) -> String {
        format!("{}?{}", self.url, self.query_string())
    }
}

/// Form-encode one query value
fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
