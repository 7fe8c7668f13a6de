//! Time-series datapoint sources
//!
//! Adapters that fetch sampled metric values and enumerate the target
//! names a backend knows about.

mod graphite;
mod url_builder;

pub use graphite::{GraphiteSource, DEFAULT_TARGET_LIMIT, TARGET_CACHE_KEY};
pub use url_builder::{GraphiteUrlBuilder, RenderParams, RenderRequest};
