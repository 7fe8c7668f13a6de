//! HTTP transport module
//!
//! Two ways out of the process:
//!
//! - **Generic transport** ([`Transport`] / [`HttpTransport`]): GET a URL with
//!   a query-parameter map, return the raw body. This is the collaborator
//!   adapters are handed; its query map cannot express repeated keys.
//! - **Direct path** ([`DirectClient`]): GET a fully assembled URL verbatim,
//!   for requests whose query string must survive exactly as built.
//!
//! Neither path retries; a failed call surfaces immediately and the caller
//! owns any retry policy. Timeouts are enforced here, not in the adapters.

mod client;
mod direct;

pub use client::{HttpTransport, RequestConfig, Transport, TransportConfig};
pub use direct::{DirectClient, DirectResponse};
