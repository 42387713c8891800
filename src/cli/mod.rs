//! Command-line interface definition and dispatch for modelsel.
//!
//! Uses [`clap`] for argument parsing with derive macros. Registry lookups
//! block on the network, so they run on tokio's blocking pool while the
//! provider stream stays on the async runtime.

mod models;

use crate::config::Config;
use crate::output::TokenBuffer;
use crate::provider::Provider;
use crate::registry::{ClientKind, ModelDescriptor, ModelRegistry};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

/// Top-level CLI structure for modelsel.
#[derive(Parser)]
#[command(
    name = "modelsel",
    about = "Pick a chat model by name, including models loaded in LM Studio"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the modelsel CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// List available models (built-in and local)
    Models {
        /// Only show models for one client family (openai, anthropic, google)
        #[arg(short, long)]
        kind: Option<ClientKind>,
    },
    /// Show which client a model name resolves to
    Resolve {
        /// Model name (case-insensitive)
        model: String,
        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask a one-shot question, streaming the answer
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// Characters buffered before output is flushed
        #[arg(long)]
        buffer_limit: Option<usize>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective config
    Show,
    /// Print the global config file path
    Path,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Models { kind } => {
            let config = Config::load()?;
            models::list_models(config, kind).await
        }
        Commands::Resolve { model, json } => {
            let config = Config::load()?;
            let descriptor = resolve_model(&config, model).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&descriptor)?);
            } else {
                print_descriptor(&descriptor);
            }
            Ok(())
        }
        Commands::Ask {
            prompt,
            model,
            buffer_limit,
        } => {
            let prompt = prompt.join(" ");
            if prompt.is_empty() {
                anyhow::bail!("No prompt provided. Usage: modelsel ask \"your question here\"");
            }

            let config = Config::load()?;
            let choice = model.or_else(|| config.default_model.clone()).context(
                "No model selected. Pass --model or set default_model in config.toml",
            )?;
            let descriptor = resolve_model(&config, choice).await?;
            let provider = Provider::from_descriptor(&descriptor, &config)?;

            println!(
                "{} [model: {}]",
                crate::constants::APP_NAME.bold().cyan(),
                provider.model().yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let limit = buffer_limit.unwrap_or_else(|| config.buffer_limit());
            let mut buffer = TokenBuffer::stdout(limit);
            provider
                .stream(&prompt, config.system_prompt.as_deref(), &mut buffer)
                .await?;
            println!();
            Ok(())
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let config = Config::load()?;
                    let path = Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    match config.lmstudio_base_url() {
                        Some(url) => println!("{} {}", "LM Studio:".bold(), url),
                        None => println!("{} {}", "LM Studio:".bold(), "(disabled)".dimmed()),
                    }
                    println!();
                    let toml_str = toml::to_string_pretty(&config)?;
                    println!("{}", toml_str);
                }
                ConfigAction::Path => {
                    println!("{}", Config::config_path()?.display());
                }
            }
            Ok(())
        }
    }
}

/// Resolves `choice` against the registry on the blocking pool.
///
/// A miss becomes an error listing the names that would have worked.
async fn resolve_model(config: &Config, choice: String) -> Result<ModelDescriptor> {
    let registry = ModelRegistry::from_config(config);
    tokio::task::spawn_blocking(move || match registry.resolve_or_available(&choice) {
        Ok(descriptor) => Ok(descriptor),
        Err(available) => {
            anyhow::bail!(
                "Unknown model: {}. Available: {}",
                choice.trim(),
                available.join(", ")
            )
        }
    })
    .await
    .context("Model resolution task failed")?
}

fn print_descriptor(descriptor: &ModelDescriptor) {
    println!("{} {}", "client:".bold(), descriptor.kind().to_string().cyan());
    for (key, value) in descriptor.params() {
        println!("  {key} = {}", value.yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_models_kind_filter_parses_case_insensitively() {
        let cli = Cli::try_parse_from(["modelsel", "models", "--kind", "Gemini"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Models {
                kind: Some(ClientKind::GoogleCompatible)
            }
        ));
    }

    #[test]
    fn test_models_kind_filter_rejects_unknown() {
        assert!(Cli::try_parse_from(["modelsel", "models", "--kind", "mistral"]).is_err());
    }

    #[test]
    fn test_models_without_filter() {
        let cli = Cli::try_parse_from(["modelsel", "models"]).unwrap();
        assert!(matches!(cli.command, Commands::Models { kind: None }));
    }
}
