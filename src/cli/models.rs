//! `modelsel models`: available models grouped by client.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;
use crate::models::LOCAL_PRESETS;
use crate::registry::{normalize_model_name, ClientKind, ModelRegistry};

/// Heading for models served by the local LM Studio endpoint.
const LOCAL_GROUP: &str = "lmstudio";

/// List all available models, grouped by client family, with LM Studio
/// models (pinned presets and discovered ones) last.
///
/// With `only` set, just that family is shown; LM Studio models count as
/// OpenAI-compatible.
pub async fn list_models(config: Config, only: Option<ClientKind>) -> Result<()> {
    let default = config.default_model.as_deref().map(normalize_model_name);
    let has_local = config.lmstudio_base_url().is_some();

    let registry = ModelRegistry::from_config(&config);
    let grouped: Vec<(&'static str, String)> = tokio::task::spawn_blocking(move || {
        let catalog = registry.catalog();
        registry
            .list_available_models()
            .into_iter()
            .map(|name| {
                let group = match catalog.get(&name) {
                    Some(_) if LOCAL_PRESETS.contains(&name.as_str()) => LOCAL_GROUP,
                    Some(descriptor) => descriptor.kind().name(),
                    None => LOCAL_GROUP,
                };
                (group, name)
            })
            .collect()
    })
    .await
    .context("Model listing task failed")?;

    println!("Available models:");

    let groups = [
        (ClientKind::OpenAICompatible.name(), ClientKind::OpenAICompatible),
        (ClientKind::AnthropicCompatible.name(), ClientKind::AnthropicCompatible),
        (ClientKind::GoogleCompatible.name(), ClientKind::GoogleCompatible),
        (LOCAL_GROUP, ClientKind::OpenAICompatible),
    ];
    for (group, kind) in groups {
        if only.is_some_and(|k| k != kind) {
            continue;
        }
        println!("\n  {}:", group.bold());
        let mut any = false;
        for (_, name) in grouped.iter().filter(|(g, _)| *g == group) {
            let marker = if default.as_deref() == Some(normalize_model_name(name).as_str()) {
                " (default)"
            } else {
                ""
            };
            println!("    {name}{marker}");
            any = true;
        }
        if !any && group == LOCAL_GROUP {
            let hint = if has_local {
                "(no models found -- is LM Studio running with a model loaded?)"
            } else {
                "(set LMSTUDIO_BASE_URL to enable local models)"
            };
            println!("    {}", hint.dimmed());
        }
    }

    Ok(())
}
