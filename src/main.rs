//! Entry point for modelsel, a model picker for chat-completion clients.
//!
//! This binary loads environment variables, sets up logging, parses CLI
//! arguments via [`cli`], and dispatches to the appropriate subcommand.

use anyhow::Result;
use modelsel::{cli, constants};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Runs the modelsel CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = cli::parse();
    cli::run(cli).await
}

/// Logs go to stderr so streamed answers on stdout stay clean.
/// Verbosity is read from `MODELSEL_LOG` (e.g. `MODELSEL_LOG=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(constants::LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(constants::DEFAULT_LOG_LEVEL));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}
