//! Client kind enumeration and per-kind construction contract.
//!
//! Defines [`ClientKind`] which identifies which client family builds a
//! model, along with the environment variables and config section each
//! family reads its credentials from.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::Serialize;

/// Identifies which chat-completion client family serves a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClientKind {
    /// OpenAI API, or any server speaking its protocol (LM Studio).
    #[serde(rename = "openai")]
    OpenAICompatible,
    /// Anthropic Messages API (Claude models).
    #[serde(rename = "anthropic")]
    AnthropicCompatible,
    /// Google Gemini API.
    #[serde(rename = "google")]
    GoogleCompatible,
}

impl ClientKind {
    /// Short lowercase name, also the config section under `[provider]`.
    pub fn name(self) -> &'static str {
        match self {
            Self::OpenAICompatible => "openai",
            Self::AnthropicCompatible => "anthropic",
            Self::GoogleCompatible => "google",
        }
    }

    /// Environment variables checked for an API key, in priority order.
    pub fn api_key_envs(self) -> &'static [&'static str] {
        match self {
            Self::OpenAICompatible => &["OPENAI_API_KEY"],
            Self::AnthropicCompatible => &["ANTHROPIC_API_KEY"],
            Self::GoogleCompatible => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        }
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClientKind {
    type Err = Error;

    /// Parses a client family name. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "openaicompatible" => Ok(Self::OpenAICompatible),
            "anthropic" | "anthropiccompatible" => Ok(Self::AnthropicCompatible),
            "google" | "gemini" | "googlecompatible" => Ok(Self::GoogleCompatible),
            other => Err(anyhow!(
                "Unknown client kind: {other}. Supported: openai, anthropic, google"
            )),
        }
    }
}
