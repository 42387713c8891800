//! Resolved model descriptors.

use std::collections::BTreeMap;

use serde::Serialize;

use super::kind::ClientKind;
use crate::constants::{LMSTUDIO_API_KEY, PARAM_API_KEY, PARAM_BASE_URL, PARAM_MODEL};

/// Which client to build for a model, and with what constructor parameters.
///
/// Descriptors are plain data: resolving a model never touches the network
/// client itself, so they can be compared, printed and serialized freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    kind: ClientKind,
    params: BTreeMap<String, String>,
}

impl ModelDescriptor {
    pub fn new<I, K, V>(kind: ClientKind, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            kind,
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Descriptor for a cloud model that only needs its name.
    pub fn hosted(kind: ClientKind, model: &str) -> Self {
        Self::new(kind, [(PARAM_MODEL, model)])
    }

    /// Descriptor for a model served by LM Studio.
    ///
    /// `base_url` is omitted when no local endpoint is configured.
    pub fn local(model: &str, base_url: Option<&str>) -> Self {
        let mut params = vec![(PARAM_MODEL, model), (PARAM_API_KEY, LMSTUDIO_API_KEY)];
        if let Some(url) = base_url {
            params.push((PARAM_BASE_URL, url));
        }
        Self::new(ClientKind::OpenAICompatible, params)
    }

    pub fn kind(&self) -> ClientKind {
        self.kind
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The model identifier to request from the provider.
    pub fn model(&self) -> Option<&str> {
        self.param(PARAM_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_descriptor_params() {
        let d = ModelDescriptor::local("Qwen3-8B", Some("http://localhost:1234/v1"));
        assert_eq!(d.kind(), ClientKind::OpenAICompatible);
        assert_eq!(d.model(), Some("Qwen3-8B"));
        assert_eq!(d.param("base_url"), Some("http://localhost:1234/v1"));
        assert_eq!(d.param("api_key"), Some("lm-studio"));
    }

    #[test]
    fn test_local_descriptor_without_endpoint() {
        let d = ModelDescriptor::local("qwen", None);
        assert_eq!(d.param("base_url"), None);
        assert_eq!(d.params().len(), 2);
    }

    #[test]
    fn test_serialize() {
        let d = ModelDescriptor::hosted(ClientKind::AnthropicCompatible, "claude-sonnet-4-5");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "anthropic",
                "params": { "model": "claude-sonnet-4-5" }
            })
        );
    }
}
