//! Configuration types and path resolution for modelsel.
//!
//! Settings are stored as TOML at the platform's XDG config path
//! (e.g. `~/.config/modelsel/config.toml` on Linux), optionally overridden
//! by a `modelsel.toml` in the current project.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
pub use types::{LmStudioConfig, ProviderConfig, ProviderEntry, StreamConfig};

use anyhow::Result;

impl Config {
    /// Load config with precedence: project > global > defaults.
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project()?;

        let mut config = global;
        if let Some(proj) = project {
            config = Self::merge(config, proj);
        }

        config.resolve_substitutions();
        Ok(config)
    }
}
