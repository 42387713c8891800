//! Built-in model table for modelsel.
//!
//! This is the single source of truth for the static catalog: the registry
//! builds its [`StaticCatalog`](crate::registry::StaticCatalog) from these
//! entries, in declaration order.

use crate::registry::ClientKind;

/// A model the catalog knows about without asking any server.
pub struct ModelInfo {
    /// The model identifier string (e.g., "claude-sonnet-4-5").
    pub name: &'static str,
    /// Which client family serves it.
    pub kind: ClientKind,
}

/// Hosted cloud models, grouped by provider.
pub const CLOUD_MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "gpt-4.1",
        kind: ClientKind::OpenAICompatible,
    },
    ModelInfo {
        name: "gpt-5.1",
        kind: ClientKind::OpenAICompatible,
    },
    ModelInfo {
        name: "gpt-5-mini",
        kind: ClientKind::OpenAICompatible,
    },
    ModelInfo {
        name: "gpt-5-nano",
        kind: ClientKind::OpenAICompatible,
    },
    ModelInfo {
        name: "claude-sonnet-4-5",
        kind: ClientKind::AnthropicCompatible,
    },
    ModelInfo {
        name: "claude-sonnet-4-0",
        kind: ClientKind::AnthropicCompatible,
    },
    ModelInfo {
        name: "gemini-2.5-flash",
        kind: ClientKind::GoogleCompatible,
    },
    ModelInfo {
        name: "gemini-2.5-flash-lite",
        kind: ClientKind::GoogleCompatible,
    },
    ModelInfo {
        name: "gemini-2.5-pro",
        kind: ClientKind::GoogleCompatible,
    },
];

/// LM Studio models pinned in the catalog even when discovery is offline.
/// They are served through the configured local endpoint.
pub const LOCAL_PRESETS: &[&str] = &["huihui-qwen3-vl-8b-instruct-abliterated"];
