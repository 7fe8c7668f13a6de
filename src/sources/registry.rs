//! Built-in source registry
//!
//! The dashboard selects adapters by name and gates UI features on their
//! capability probes; this registry is that lookup surface.

use super::{CiSource, DatapointSource, JenkinsSource};
use crate::settings::Settings;
use crate::sources::GraphiteSource;
use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of source adapters, keyed by type name per contract kind
#[derive(Default)]
pub struct SourceRegistry {
    datapoints: HashMap<&'static str, Arc<dyn DatapointSource>>,
    ci: HashMap<&'static str, Arc<dyn CiSource>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in adapter registered
    pub fn builtin(settings: &Settings, transport: Arc<dyn Transport>) -> Self {
        let mut registry = Self::new();
        registry.register_datapoint_source(Arc::new(GraphiteSource::new(
            settings,
            Arc::clone(&transport),
        )));
        registry.register_ci_source(Arc::new(JenkinsSource::new(transport)));
        registry
    }

    /// Register a datapoint source under its own name
    pub fn register_datapoint_source(&mut self, source: Arc<dyn DatapointSource>) {
        self.datapoints.insert(source.name(), source);
    }

    /// Register a CI source under its own name
    pub fn register_ci_source(&mut self, source: Arc<dyn CiSource>) {
        self.ci.insert(source.name(), source);
    }

    /// Look up a datapoint source by name
    pub fn datapoint_source(&self, name: &str) -> Option<Arc<dyn DatapointSource>> {
        self.datapoints.get(name).cloned()
    }

    /// Look up a CI source by name
    pub fn ci_source(&self, name: &str) -> Option<Arc<dyn CiSource>> {
        self.ci.get(name).cloned()
    }

    /// Names of all registered datapoint sources, sorted
    pub fn datapoint_source_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.datapoints.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Names of all registered CI sources, sorted
    pub fn ci_source_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.ci.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Datapoint sources that are configured and can enumerate targets,
    /// the set the dashboard offers a target browser for
    pub fn browsable_datapoint_sources(&self) -> Vec<Arc<dyn DatapointSource>> {
        let mut sources: Vec<_> = self
            .datapoints
            .values()
            .filter(|source| source.available() && source.supports_target_browsing())
            .cloned()
            .collect();
        sources.sort_unstable_by_key(|source| source.name());
        sources
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("datapoints", &self.datapoint_source_names())
            .field("ci", &self.ci_source_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpTransport;

    fn transport() -> Arc<dyn Transport> {
        Arc::new(HttpTransport::new())
    }

    #[test]
    fn test_builtin_registry_contents() {
        let settings = Settings::with_graphite_url("http://graphite.internal");
        let registry = SourceRegistry::builtin(&settings, transport());

        assert_eq!(registry.datapoint_source_names(), vec!["graphite"]);
        assert_eq!(registry.ci_source_names(), vec!["jenkins"]);
        assert!(registry.datapoint_source("graphite").is_some());
        assert!(registry.ci_source("jenkins").is_some());
        assert!(registry.datapoint_source("carbon").is_none());
    }

    #[test]
    fn test_browsable_sources_respect_availability() {
        let registry = SourceRegistry::builtin(&Settings::new(), transport());
        assert!(registry.browsable_datapoint_sources().is_empty());

        let settings = Settings::with_graphite_url("http://graphite.internal");
        let registry = SourceRegistry::builtin(&settings, transport());
        let browsable = registry.browsable_datapoint_sources();
        assert_eq!(browsable.len(), 1);
        assert_eq!(browsable[0].name(), "graphite");
    }
}
