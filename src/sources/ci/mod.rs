//! CI build-status sources
//!
//! Adapters that answer "how did the last build go, and is one running
//! now" against a CI server, normalized into [`crate::types::CiStatus`].

mod jenkins;

pub use jenkins::JenkinsSource;
