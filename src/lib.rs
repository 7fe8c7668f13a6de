// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Dashwire Adapter Development Kit (ADK)
//!
//! A minimal, Rust-native adapter kit for dashboard telemetry sources.
//! One contract per telemetry kind, one adapter per backend.
//!
//! ## Features
//!
//! - **CI Build Status**: Jenkins-style last-build queries normalized into a
//!   canonical status record
//! - **Time-Series Datapoints**: Graphite-style render queries with repeated
//!   `target` parameters encoded correctly
//! - **Target Discovery**: browse available metric names with pattern
//!   filtering, backed by a TTL cache
//! - **Capability Probing**: adapters expose static capability flags instead
//!   of inheritance hierarchies
//! - **Typed Errors**: configuration, not-found, upstream-parse, and
//!   transport failures are distinct kinds
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dashwire_adk::sources::{DatapointSource, GraphiteSource};
//! use dashwire_adk::settings::Settings;
//! use dashwire_adk::transport::HttpTransport;
//! use dashwire_adk::Result;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let settings = Settings::from_env();
//!     let source = GraphiteSource::new(&settings, Arc::new(HttpTransport::new()));
//!
//!     if source.available() {
//!         let targets = source.available_targets(&Default::default()).await?;
//!         println!("{} targets", targets.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Source Contracts                          │
//! │  CiSource: fields() → Vec<FieldSpec>    get(config) → CiStatus  │
//! │  DatapointSource: available()  get(targets, from, to) → Series  │
//! │                   available_targets(query) → Vec<String>        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──────────┬──────────────────────┐
//! │  Transport   │        Adapters          │        Cache         │
//! ├──────────────┼──────────────────────────┼──────────────────────┤
//! │ GET / query  │ Jenkins (CI status)      │ TTL get-or-compute   │
//! │ Direct path  │ Graphite (datapoints)    │ per-type target key  │
//! │ Basic auth   │ Marker-scan classifier   │                      │
//! └──────────────┴──────────────────────────┴──────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the ADK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Process-level settings
pub mod settings;

/// HTTP transport (generic collaborator and the direct-request path)
pub mod transport;

/// Lenient response decoding
pub mod decode;

/// TTL cache with get-or-compute semantics
pub mod cache;

/// Source contracts and backend adapters
pub mod sources;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
