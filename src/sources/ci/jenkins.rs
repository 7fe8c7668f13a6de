//! Jenkins-style CI status adapter
//!
//! Queries `<server>/job/<project>/lastBuild/api/json` through the
//! generic transport and normalizes the response. Older Jenkins versions
//! don't return `application/json` as the Content-Type, so the body is
//! decoded leniently rather than trusting the header.

use crate::decode::{decode_lenient, Decoded};
use crate::error::Result;
use crate::sources::{require_field, CiSource, FieldSpec};
use crate::transport::{RequestConfig, Transport};
use crate::types::{ActivityStatus, BuildStatus, CiStatus, StringMap};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// CI source for Jenkins-style servers
pub struct JenkinsSource {
    transport: Arc<dyn Transport>,
}

impl JenkinsSource {
    /// Create a Jenkins source issuing requests through `transport`
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn request_build_status(&self, server_url: &str, project: &str) -> Result<String> {
        let url = format!(
            "{}/job/{project}/lastBuild/api/json",
            server_url.trim_end_matches('/')
        );
        debug!("Requesting build status from {url}");
        self.transport.request(&url, RequestConfig::default()).await
    }
}

impl std::fmt::Debug for JenkinsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JenkinsSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl CiSource for JenkinsSource {
    fn name(&self) -> &'static str {
        "jenkins"
    }

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::mandatory("server_url", "Server Url"),
            FieldSpec::mandatory("project", "Project"),
        ]
    }

    async fn get(&self, config: &StringMap) -> Result<CiStatus> {
        let server_url = require_field(config, "server_url")?;
        let project = require_field(config, "project")?;

        let body = self.request_build_status(server_url, project).await?;
        Ok(normalize(&decode_lenient(&body)))
    }
}

/// Normalize a decoded last-build payload into the canonical record.
///
/// A raw or non-object payload degrades every field rather than erroring.
fn normalize(decoded: &Decoded) -> CiStatus {
    let Some(value) = decoded.as_structured() else {
        return CiStatus::unknown();
    };

    CiStatus {
        label: value
            .get("fullDisplayName")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        last_build_time: value
            .get("lastBuildTime")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
        last_build_status: BuildStatus::classify(value.get("result").and_then(Value::as_str)),
        current_status: ActivityStatus::classify(value.get("building").and_then(Value::as_bool)),
    }
}
