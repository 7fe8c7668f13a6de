//! Common types used throughout Dashwire ADK
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// CI Build Status
// ============================================================================

/// Outcome of the most recent completed build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    /// Upstream status text contained "success"
    Success,
    /// Upstream status text contained "failure"
    Failure,
    /// Anything else, including an absent status
    #[default]
    Unknown,
}

impl BuildStatus {
    /// Classify upstream status text, case-insensitively.
    ///
    /// "success" wins over "failure" when both appear, matching the
    /// upstream servers this was written against.
    pub fn classify(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::Unknown;
        };
        let lowered = text.to_ascii_lowercase();
        if lowered.contains("success") {
            Self::Success
        } else if lowered.contains("failure") {
            Self::Failure
        } else {
            Self::Unknown
        }
    }
}

/// Whether a build is currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Upstream reported an in-progress build
    Building,
    /// Upstream reported no build in progress
    Idle,
    /// Upstream omitted the building flag
    #[default]
    Unknown,
}

impl ActivityStatus {
    /// Classify the upstream "building" flag
    pub fn classify(building: Option<bool>) -> Self {
        match building {
            None => Self::Unknown,
            Some(true) => Self::Building,
            Some(false) => Self::Idle,
        }
    }
}

/// Canonical build-status record returned by CI sources
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CiStatus {
    /// Display label of the build, if the upstream supplied one
    pub label: Option<String>,

    /// Upstream timestamp of the last build, passed through as-is
    pub last_build_time: Option<String>,

    /// Outcome of the last completed build
    pub last_build_status: BuildStatus,

    /// Whether a build is running right now
    pub current_status: ActivityStatus,
}

impl CiStatus {
    /// A record with every field degraded to absent/unknown
    pub fn unknown() -> Self {
        Self::default()
    }
}

// ============================================================================
// Datapoint Series
// ============================================================================

/// One sampled value: `[value, timestamp]` on the wire, value may be null
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Datapoint(pub Option<f64>, pub i64);

impl Datapoint {
    /// The sampled value, if the backend recorded one for this interval
    pub fn value(&self) -> Option<f64> {
        self.0
    }

    /// Unix timestamp of the sample
    pub fn timestamp(&self) -> i64 {
        self.1
    }
}

/// Time-series data for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSeries {
    /// The target expression this series answers
    pub target: String,

    /// Sampled values in time order
    pub datapoints: Vec<Datapoint>,
}

/// Parsed result of a datapoint query, one entry per target
pub type DatapointSeries = Vec<TargetSeries>;

// ============================================================================
// Target Discovery Query
// ============================================================================

/// Options for browsing available targets
#[derive(Debug, Clone, Default)]
pub struct TargetQuery {
    /// Pattern to filter target names (regular expression)
    pub pattern: Option<String>,

    /// Maximum number of targets to return
    pub limit: Option<usize>,
}

impl TargetQuery {
    /// Create an empty query (no filter, default limit)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter pattern
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the result limit
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
