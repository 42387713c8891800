//! Model registry for modelsel.
//!
//! Resolves a human-supplied model name to a [`ModelDescriptor`] by merging
//! the built-in [`StaticCatalog`] with models discovered on a local LM Studio
//! server. Lookups are case- and whitespace-insensitive, and a static entry
//! always shadows a discovered model with the same normalized name.

mod catalog;
mod descriptor;
mod discovery;
mod kind;

pub use catalog::{normalize_model_name, StaticCatalog};
pub use descriptor::ModelDescriptor;
pub use discovery::{DiscoveryError, LocalDiscovery, ModelSource};
pub use kind::ClientKind;

use std::collections::HashSet;
use std::time::Duration;

use crate::config::Config;

/// Static catalog plus a live source of local models.
pub struct ModelRegistry<S = LocalDiscovery> {
    catalog: StaticCatalog,
    source: S,
    local_base_url: Option<String>,
}

impl ModelRegistry<LocalDiscovery> {
    /// Builds the registry from the loaded config: built-in catalog, and
    /// LM Studio discovery against the configured endpoint (if any).
    pub fn from_config(config: &Config) -> Self {
        let base_url = config.lmstudio_base_url();
        match base_url.as_deref() {
            Some(url) => tracing::debug!("local model discovery at {url}"),
            None => tracing::debug!("no LM Studio endpoint configured; discovery disabled"),
        }
        let source = LocalDiscovery::new(base_url.as_deref())
            .with_timeout(Duration::from_secs(config.discovery_timeout_secs()));
        Self::new(
            StaticCatalog::builtin(base_url.as_deref()),
            source,
            base_url,
        )
    }
}

impl<S: ModelSource> ModelRegistry<S> {
    /// `local_base_url` is stamped into descriptors synthesized for
    /// discovered models.
    pub fn new(catalog: StaticCatalog, source: S, local_base_url: Option<String>) -> Self {
        Self {
            catalog,
            source,
            local_base_url,
        }
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }

    /// Queries the local server for its models. Never fails; re-fetched on
    /// every call.
    pub fn fetch_dynamic_models(&self) -> Vec<String> {
        self.source.fetch_models()
    }

    /// All selectable model names.
    ///
    /// Static catalog keys come first in declaration order, followed by
    /// discovered models that the catalog does not already cover, sorted
    /// case-insensitively. When two discovered names differ only in case,
    /// the first one reported is kept.
    pub fn list_available_models(&self) -> Vec<String> {
        self.merge_names(self.fetch_dynamic_models())
    }

    /// Resolves a model choice to its descriptor.
    ///
    /// Checks the static catalog first; only on a miss is the local server
    /// asked. Returns `None` when neither knows the model.
    pub fn resolve(&self, model_choice: &str) -> Option<ModelDescriptor> {
        self.resolve_or_available(model_choice).ok()
    }

    /// Like [`resolve`](Self::resolve), but a miss returns the names that
    /// would have matched, built from the same discovery response. The
    /// local server is queried at most once.
    pub fn resolve_or_available(
        &self,
        model_choice: &str,
    ) -> Result<ModelDescriptor, Vec<String>> {
        let key = normalize_model_name(model_choice);
        if let Some(descriptor) = self.catalog.get(&key) {
            return Ok(descriptor.clone());
        }

        let discovered = self.fetch_dynamic_models();
        match discovered
            .iter()
            .find(|name| normalize_model_name(name) == key)
        {
            Some(name) => Ok(ModelDescriptor::local(name, self.local_base_url.as_deref())),
            None => Err(self.merge_names(discovered)),
        }
    }

    fn merge_names(&self, discovered: Vec<String>) -> Vec<String> {
        let mut names: Vec<String> = self.catalog.keys().map(String::from).collect();

        let mut seen: HashSet<String> = names.iter().cloned().collect();
        let mut dynamic: Vec<(String, String)> = discovered
            .into_iter()
            .filter_map(|name| {
                let key = normalize_model_name(&name);
                seen.insert(key.clone()).then_some((key, name))
            })
            .collect();
        dynamic.sort_by(|a, b| a.0.cmp(&b.0));

        names.extend(dynamic.into_iter().map(|(_, name)| name));
        names
    }
}
