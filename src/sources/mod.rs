//! Source contracts and backend adapters
//!
//! A *source* is an adapter for one backend system. Two contracts exist,
//! one per telemetry kind:
//!
//! - [`CiSource`] — continuous-integration build status
//! - [`DatapointSource`] — time-series metric data
//!
//! Conforming adapters are interchangeable at the call site. Capability
//! differences are expressed as probe methods returning static booleans
//! per concrete type, not as subclassing.

use crate::error::{Error, Result};
use crate::types::{CiStatus, DatapointSeries, StringMap, TargetQuery};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod ci;
pub mod datapoints;
mod registry;

pub use ci::JenkinsSource;
pub use datapoints::{GraphiteSource, GraphiteUrlBuilder, RenderRequest};
pub use registry::SourceRegistry;

// ============================================================================
// Field Declarations (for UI-driven configuration)
// ============================================================================

/// One configuration input a source needs, declared statically per
/// adapter type and rendered by the dashboard's configuration UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Machine name of the field (the config map key)
    pub name: &'static str,

    /// Human-readable title
    pub title: &'static str,

    /// Whether the field must be present for `get` to succeed
    pub mandatory: bool,
}

impl FieldSpec {
    /// Declare a mandatory field
    pub fn mandatory(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            mandatory: true,
        }
    }

    /// Declare an optional field
    pub fn optional(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            mandatory: false,
        }
    }
}

/// Read a mandatory field from an adapter configuration.
///
/// Absent and blank values both fail with
/// [`Error::MissingConfigField`].
pub fn require_field<'a>(config: &'a StringMap, field: &str) -> Result<&'a str> {
    config
        .get(field)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::missing_field(field))
}

// ============================================================================
// Contracts
// ============================================================================

/// Contract for CI build-status sources
#[async_trait]
pub trait CiSource: Send + Sync {
    /// Name this source registers under
    fn name(&self) -> &'static str;

    /// Static declaration of the configuration fields this source needs
    fn fields(&self) -> Vec<FieldSpec>;

    /// Fetch and normalize the latest build status.
    ///
    /// Mandatory fields from [`fields`](CiSource::fields) must be present
    /// in `config`. An unparseable upstream body is not an error; it
    /// degrades to absent/unknown fields in the returned record.
    async fn get(&self, config: &StringMap) -> Result<CiStatus>;
}

/// Contract for time-series datapoint sources
#[async_trait]
pub trait DatapointSource: Send + Sync {
    /// Name this source registers under
    fn name(&self) -> &'static str;

    /// Capability probe: is this source fully configured in this process?
    fn available(&self) -> bool;

    /// Whether the backend can enumerate its target names
    fn supports_target_browsing(&self) -> bool;

    /// Whether target expressions may contain backend functions
    fn supports_functions(&self) -> bool;

    /// Fetch datapoints for the given targets over `[from, to]`.
    ///
    /// A structurally valid but empty result set is [`Error::NotFound`];
    /// a non-empty one is returned unmodified.
    async fn get(
        &self,
        targets: &[String],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<DatapointSeries>;

    /// Enumerate available target names, filtered and truncated per
    /// `query`. Backed by a shared per-type cache; the filter applies to
    /// the full cached list before the limit does.
    async fn available_targets(&self, query: &TargetQuery) -> Result<Vec<String>>;
}
