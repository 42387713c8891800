//! The static model catalog.

use super::descriptor::ModelDescriptor;
use crate::models::{CLOUD_MODELS, LOCAL_PRESETS};

/// Canonical lookup key for a model name: trimmed and lowercased.
pub fn normalize_model_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Ordered table of models known at startup.
///
/// Keys are stored normalized; iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<(String, ModelDescriptor)>,
}

impl StaticCatalog {
    /// Builds the catalog from the built-in model table.
    ///
    /// Local presets point at `local_base_url`, which is fixed for the life
    /// of the process.
    pub fn builtin(local_base_url: Option<&str>) -> Self {
        let cloud = CLOUD_MODELS
            .iter()
            .map(|info| (info.name, ModelDescriptor::hosted(info.kind, info.name)));
        let local = LOCAL_PRESETS
            .iter()
            .map(|name| (*name, ModelDescriptor::local(name, local_base_url)));
        Self::from_entries(cloud.chain(local))
    }

    /// Builds a catalog from `(name, descriptor)` pairs.
    ///
    /// A name that normalizes to an existing key is dropped; the first
    /// declaration wins.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ModelDescriptor)>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for (name, descriptor) in entries {
            let key = normalize_model_name(name.as_ref());
            if catalog.contains(&key) {
                tracing::warn!("duplicate catalog entry {key:?} ignored");
                continue;
            }
            catalog.entries.push((key, descriptor));
        }
        catalog
    }

    /// Looks up an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&ModelDescriptor> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, d)| d)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Catalog keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClientKind;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_model_name("  GPT-4.1\n"), "gpt-4.1");
        assert_eq!(normalize_model_name("gpt-4.1"), "gpt-4.1");
    }

    #[test]
    fn test_builtin_order_and_contents() {
        let catalog = StaticCatalog::builtin(None);
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys.first(), Some(&"gpt-4.1"));
        assert_eq!(keys.last(), Some(&"huihui-qwen3-vl-8b-instruct-abliterated"));
        assert_eq!(catalog.len(), CLOUD_MODELS.len() + LOCAL_PRESETS.len());
        assert!(!catalog.is_empty());
        assert!(StaticCatalog::default().is_empty());

        let gemini = catalog.get("gemini-2.5-pro").unwrap();
        assert_eq!(gemini.kind(), ClientKind::GoogleCompatible);
        assert_eq!(gemini.model(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_local_preset_uses_endpoint() {
        let catalog = StaticCatalog::builtin(Some("http://127.0.0.1:1234/v1"));
        let preset = catalog
            .get("huihui-qwen3-vl-8b-instruct-abliterated")
            .unwrap();
        assert_eq!(preset.kind(), ClientKind::OpenAICompatible);
        assert_eq!(preset.param("base_url"), Some("http://127.0.0.1:1234/v1"));
        assert_eq!(preset.param("api_key"), Some("lm-studio"));
    }

    #[test]
    fn test_from_entries_first_declaration_wins() {
        let catalog = StaticCatalog::from_entries([
            ("Alpha", ModelDescriptor::hosted(ClientKind::OpenAICompatible, "alpha")),
            (" alpha ", ModelDescriptor::hosted(ClientKind::GoogleCompatible, "other")),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("alpha").unwrap().kind(),
            ClientKind::OpenAICompatible
        );
    }
}
