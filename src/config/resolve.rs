//! Environment variable substitution and effective-setting resolution.

use super::types::{Config, ProviderEntry};

use crate::constants::{
    DEFAULT_BUFFER_LIMIT, DEFAULT_TEMPERATURE, DISCOVERY_TIMEOUT_SECS, LMSTUDIO_BASE_URL_ENV,
};
use crate::registry::ClientKind;

impl Config {
    /// Resolve {env:VAR_NAME} patterns in string fields.
    pub(super) fn resolve_substitutions(&mut self) {
        for field in [
            &mut self.default_model,
            &mut self.system_prompt,
            &mut self.lmstudio.base_url,
        ] {
            if let Some(s) = field {
                *s = Self::resolve_str(s);
            }
        }
        Self::resolve_provider_entry(&mut self.provider.openai);
        Self::resolve_provider_entry(&mut self.provider.anthropic);
        Self::resolve_provider_entry(&mut self.provider.google);
    }

    fn resolve_provider_entry(entry: &mut Option<ProviderEntry>) {
        if let Some(key) = entry.as_mut().and_then(|e| e.api_key.as_mut()) {
            *key = Self::resolve_str(key);
        }
    }

    /// Replace {env:VAR} with the environment variable value.
    pub(super) fn resolve_str(s: &str) -> String {
        let mut result = s.to_string();
        while let Some(start) = result.find("{env:") {
            if let Some(end) = result[start..].find('}') {
                let var_name = &result[start + 5..start + end];
                let value = std::env::var(var_name).unwrap_or_default();
                result = format!(
                    "{}{}{}",
                    &result[..start],
                    value,
                    &result[start + end + 1..]
                );
            } else {
                break;
            }
        }
        result
    }

    /// Resolve the API key for a client kind: env vars first, then config.
    pub fn resolve_api_key(&self, kind: ClientKind) -> Option<String> {
        let from_env = kind
            .api_key_envs()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|val| !val.is_empty());
        if from_env.is_some() {
            return from_env;
        }

        let entry = match kind {
            ClientKind::OpenAICompatible => &self.provider.openai,
            ClientKind::AnthropicCompatible => &self.provider.anthropic,
            ClientKind::GoogleCompatible => &self.provider.google,
        };
        entry
            .as_ref()
            .and_then(|e| e.api_key.clone())
            .filter(|key| !key.is_empty())
    }

    /// The LM Studio base URL, or `None` when discovery is disabled.
    /// `LMSTUDIO_BASE_URL` overrides the config file.
    pub fn lmstudio_base_url(&self) -> Option<String> {
        pick_base_url(
            std::env::var(LMSTUDIO_BASE_URL_ENV).ok(),
            self.lmstudio.base_url.clone(),
        )
    }

    pub fn discovery_timeout_secs(&self) -> u64 {
        self.lmstudio.timeout_secs.unwrap_or(DISCOVERY_TIMEOUT_SECS)
    }

    /// Buffer limit for streamed output; never zero.
    pub fn buffer_limit(&self) -> usize {
        self.stream
            .buffer_limit
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_BUFFER_LIMIT)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(DEFAULT_TEMPERATURE)
    }
}

/// First non-blank candidate wins.
fn pick_base_url(env: Option<String>, configured: Option<String>) -> Option<String> {
    [env, configured]
        .into_iter()
        .flatten()
        .map(|url| url.trim().to_string())
        .find(|url| !url.is_empty())
}
