//! Struct definitions for modelsel configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for modelsel, deserialized from `config.toml`.
///
/// Every field is optional so modelsel runs with built-in defaults when no
/// config file exists, and so a project file only overrides what it sets.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Model used by `ask` when `--model` is not given.
    #[serde(default)]
    pub default_model: Option<String>,
    /// Sampling temperature for completions.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Optional system prompt prepended to every request.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Local LM Studio server.
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
    /// Streaming display settings.
    #[serde(default)]
    pub stream: StreamConfig,
    /// Per-provider credentials.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Where to find LM Studio and how long to wait for it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LmStudioConfig {
    /// OpenAI-compatible base URL, e.g. `http://localhost:1234/v1`.
    pub base_url: Option<String>,
    /// Timeout for model discovery, in seconds.
    pub timeout_secs: Option<u64>,
}

/// Token buffering for streamed output.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StreamConfig {
    /// Characters accumulated before a flush is forced.
    pub buffer_limit: Option<usize>,
}

/// Provider-specific configuration map, one entry per [`ClientKind`].
///
/// [`ClientKind`]: crate::registry::ClientKind
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    pub openai: Option<ProviderEntry>,
    pub anthropic: Option<ProviderEntry>,
    pub google: Option<ProviderEntry>,
}

/// Credentials for a single provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderEntry {
    /// API key for authentication. Environment variables take precedence.
    pub api_key: Option<String>,
}
