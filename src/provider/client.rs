//! LLM provider client and streaming implementation.
//!
//! Contains the [`Provider`] struct which wraps rig-core provider clients
//! behind enum dispatch. Which client gets built is decided entirely by a
//! [`ModelDescriptor`]; this is the only place that touches rig-core.

use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use rig::agent::MultiTurnStreamItem;
use rig::client::CompletionClient;
use rig::message::Text;
use rig::providers::{anthropic, gemini, openai};
use rig::streaming::{StreamedAssistantContent, StreamingPrompt};

use crate::config::Config;
use crate::constants::{LMSTUDIO_BASE_URL_ENV, PARAM_API_KEY, PARAM_BASE_URL};
use crate::output::Renderer;
use crate::registry::{ClientKind, ModelDescriptor};

/// Internal enum wrapping provider-specific clients.
enum Backend {
    OpenAI(openai::Client),
    Anthropic(anthropic::Client),
    Gemini(gemini::Client),
}

/// A configured LLM provider ready to stream completions.
///
/// Agents are constructed on each call since they are cheap to create.
pub struct Provider {
    backend: Backend,
    model: String,
    temperature: f64,
}

/// Builds an agent from the given client, model, temperature and optional
/// system prompt, then executes the provided block with the agent bound to
/// `$agent`.
macro_rules! with_agent {
    ($client:expr, $model:expr, $temp:expr, $sys:expr, |$agent:ident| $body:expr) => {{
        let $agent = if let Some(sys) = $sys {
            $client
                .agent($model)
                .preamble(sys)
                .temperature($temp)
                .max_tokens(crate::constants::MAX_TOKENS)
                .build()
        } else {
            $client
                .agent($model)
                .temperature($temp)
                .max_tokens(crate::constants::MAX_TOKENS)
                .build()
        };
        $body
    }};
}

/// Dispatches an operation across provider-specific clients.
macro_rules! dispatch {
    ($self:expr, |$client:ident| $body:expr) => {
        match &$self.backend {
            Backend::OpenAI($client) => $body,
            Backend::Anthropic($client) => $body,
            Backend::Gemini($client) => $body,
        }
    };
}

/// Processes a streaming response, rendering tokens and accumulating the full text.
macro_rules! process_stream {
    ($stream:expr, $renderer:expr, $full_response:expr) => {
        while let Some(chunk) = $stream.next().await {
            match chunk {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text, .. },
                ))) => {
                    $renderer.render_token(&text);
                    $full_response.push_str(&text);
                }
                Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                    // Stream complete
                }
                Err(err) => {
                    $renderer.render_error(&err.to_string());
                    anyhow::bail!("Streaming error: {}", err);
                }
                _ => {
                    // Reasoning and tool deltas are not displayed
                }
            }
        }
    };
}

impl Provider {
    /// Creates a [`Provider`] for a resolved model.
    ///
    /// An OpenAI-compatible descriptor carrying a `base_url` targets that
    /// server with the descriptor's own `api_key`; every other descriptor
    /// uses the key resolved from the environment or config file. A local
    /// descriptor (own `api_key`, no `base_url`) is refused so it never
    /// reaches the hosted OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor names no model, if a local model
    /// has no endpoint, if no API key is available for a hosted provider, or
    /// if client construction fails.
    pub fn from_descriptor(descriptor: &ModelDescriptor, config: &Config) -> Result<Self> {
        let model = descriptor
            .model()
            .ok_or_else(|| anyhow!("Model descriptor has no `model` parameter"))?
            .to_string();
        let kind = descriptor.kind();

        let backend = match (kind, descriptor.param(PARAM_BASE_URL)) {
            (ClientKind::OpenAICompatible, Some(base_url)) => {
                let api_key = descriptor
                    .param(PARAM_API_KEY)
                    .map(String::from)
                    .or_else(|| config.resolve_api_key(kind))
                    .unwrap_or_default();
                tracing::debug!("building OpenAI-compatible client for {base_url}");
                let client = openai::Client::builder()
                    .api_key(&api_key)
                    .base_url(base_url)
                    .build()
                    .context("Failed to create OpenAI-compatible client")?;
                Backend::OpenAI(client)
            }
            (ClientKind::OpenAICompatible, None) if descriptor.param(PARAM_API_KEY).is_some() => {
                anyhow::bail!(
                    "Model {model} is served by LM Studio, but no endpoint is configured. \
                     Set {LMSTUDIO_BASE_URL_ENV} or [lmstudio] base_url in config.toml"
                );
            }
            (ClientKind::OpenAICompatible, None) => {
                let api_key = require_api_key(config, kind)?;
                let client =
                    openai::Client::new(&api_key).context("Failed to create OpenAI client")?;
                Backend::OpenAI(client)
            }
            (ClientKind::AnthropicCompatible, _) => {
                let api_key = require_api_key(config, kind)?;
                let client = anthropic::Client::new(&api_key)
                    .context("Failed to create Anthropic client")?;
                Backend::Anthropic(client)
            }
            (ClientKind::GoogleCompatible, _) => {
                let api_key = require_api_key(config, kind)?;
                let client =
                    gemini::Client::new(&api_key).context("Failed to create Gemini client")?;
                Backend::Gemini(client)
            }
        };

        Ok(Self {
            backend,
            model,
            temperature: config.temperature(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Streams a prompt response, rendering tokens as they arrive via the given [`Renderer`].
    ///
    /// Returns the full accumulated response text. [`Renderer::render_done`]
    /// is called once the stream ends, so a [`TokenBuffer`] flushes its
    /// remainder.
    ///
    /// [`TokenBuffer`]: crate::output::TokenBuffer
    ///
    /// # Errors
    ///
    /// Returns an error if a streaming chunk fails (network error, invalid key, etc.).
    pub async fn stream(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        renderer: &mut dyn Renderer,
    ) -> Result<String> {
        let mut full_response = String::new();

        dispatch!(self, |client| {
            let mut stream = with_agent!(
                client,
                &self.model,
                self.temperature,
                system_prompt,
                |agent| agent.stream_prompt(prompt).await
            );
            process_stream!(stream, renderer, full_response);
        });

        renderer.render_done();
        Ok(full_response)
    }
}

fn require_api_key(config: &Config, kind: ClientKind) -> Result<String> {
    config.resolve_api_key(kind).with_context(|| {
        format!(
            "No API key found for {kind}. Set {} or configure [provider.{}] in config.toml",
            kind.api_key_envs().join(" or "),
            kind.name()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_descriptor_builds_without_cloud_key() {
        let descriptor = ModelDescriptor::local("qwen3-8b", Some("http://localhost:1234/v1"));
        let provider = Provider::from_descriptor(&descriptor, &Config::default()).unwrap();
        assert_eq!(provider.model(), "qwen3-8b");
        assert!(matches!(provider.backend, Backend::OpenAI(_)));
    }

    #[test]
    fn test_local_preset_without_endpoint_is_rejected() {
        let mut config = Config::default();
        config.provider.openai = Some(crate::config::ProviderEntry {
            api_key: Some("sk-real-cloud".into()),
        });
        let catalog = crate::registry::StaticCatalog::builtin(None);
        let descriptor = catalog
            .get("huihui-qwen3-vl-8b-instruct-abliterated")
            .unwrap();
        let err = Provider::from_descriptor(descriptor, &config).err().unwrap();
        assert!(err.to_string().contains("LMSTUDIO_BASE_URL"));
    }

    #[test]
    fn test_hosted_openai_uses_cloud_key() {
        let mut config = Config::default();
        config.provider.openai = Some(crate::config::ProviderEntry {
            api_key: Some("sk-test".into()),
        });
        let descriptor = ModelDescriptor::hosted(ClientKind::OpenAICompatible, "gpt-4.1");
        let provider = Provider::from_descriptor(&descriptor, &config).unwrap();
        assert!(matches!(provider.backend, Backend::OpenAI(_)));
    }

    #[test]
    fn test_descriptor_without_model_is_rejected() {
        let descriptor = ModelDescriptor::new(
            ClientKind::OpenAICompatible,
            [("base_url", "http://localhost:1234/v1")],
        );
        let err = Provider::from_descriptor(&descriptor, &Config::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_configured_key_is_used() {
        let mut config = Config::default();
        config.provider.anthropic = Some(crate::config::ProviderEntry {
            api_key: Some("sk-ant-test".into()),
        });
        let descriptor =
            ModelDescriptor::hosted(ClientKind::AnthropicCompatible, "claude-sonnet-4-5");
        let provider = Provider::from_descriptor(&descriptor, &config).unwrap();
        assert!(matches!(provider.backend, Backend::Anthropic(_)));
    }
}
