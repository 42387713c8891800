//! File loading and merging for modelsel configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::{Config, LmStudioConfig, ProviderConfig, ProviderEntry, StreamConfig};

impl Config {
    /// Loads the global config from `~/.config/modelsel/config.toml`.
    ///
    /// A missing file is not an error: defaults are returned and nothing is
    /// written to disk.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Reads and parses a single TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        Ok(config)
    }

    /// Look for modelsel.toml in the current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let cwd = std::env::current_dir()?;
        match Self::find_project_config(&cwd) {
            Some(path) => Self::from_file(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the nearest project config file at or above `start`,
    /// stopping at the git root or filesystem root.
    pub(super) fn find_project_config(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if dir.join(".git").exists() || !dir.pop() {
                return None;
            }
        }
    }

    /// Merge project config over global config.
    /// Project values win when present.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        Config {
            default_model: project.default_model.or(global.default_model),
            temperature: project.temperature.or(global.temperature),
            system_prompt: project.system_prompt.or(global.system_prompt),
            lmstudio: LmStudioConfig {
                base_url: project.lmstudio.base_url.or(global.lmstudio.base_url),
                timeout_secs: project
                    .lmstudio
                    .timeout_secs
                    .or(global.lmstudio.timeout_secs),
            },
            stream: StreamConfig {
                buffer_limit: project.stream.buffer_limit.or(global.stream.buffer_limit),
            },
            provider: ProviderConfig {
                openai: merge_entry(project.provider.openai, global.provider.openai),
                anthropic: merge_entry(project.provider.anthropic, global.provider.anthropic),
                google: merge_entry(project.provider.google, global.provider.google),
            },
        }
    }
}

fn merge_entry(project: Option<ProviderEntry>, global: Option<ProviderEntry>) -> Option<ProviderEntry> {
    match (project, global) {
        (Some(p), Some(g)) => Some(ProviderEntry {
            api_key: p.api_key.or(g.api_key),
        }),
        (p, g) => p.or(g),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
default_model = "gpt-5-mini"

[lmstudio]
base_url = "http://localhost:1234/v1"

[stream]
buffer_limit = 80

[provider.anthropic]
api_key = "sk-ant"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.default_model.as_deref(), Some("gpt-5-mini"));
        assert_eq!(
            config.lmstudio.base_url.as_deref(),
            Some("http://localhost:1234/v1")
        );
        assert_eq!(config.stream.buffer_limit, Some(80));
        assert_eq!(
            config.provider.anthropic.unwrap().api_key.as_deref(),
            Some("sk-ant")
        );
        assert!(config.provider.openai.is_none());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_model = [").unwrap();
        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_find_project_config_walks_up_to_git_root() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::find_project_config(&nested), None);

        let file = root.path().join(crate::constants::PROJECT_CONFIG_FILENAME);
        fs::write(&file, "temperature = 0.5").unwrap();
        assert_eq!(Config::find_project_config(&nested), Some(file));
    }

    #[test]
    fn test_merge_project_wins() {
        let global: Config = toml::from_str(
            r#"
default_model = "gpt-4.1"
temperature = 0.0
[lmstudio]
base_url = "http://global:1234/v1"
timeout_secs = 3
[provider.openai]
api_key = "global-key"
"#,
        )
        .unwrap();
        let project: Config = toml::from_str(
            r#"
default_model = "claude-sonnet-4-5"
[lmstudio]
base_url = "http://project:1234/v1"
[provider.openai]
"#,
        )
        .unwrap();

        let merged = Config::merge(global, project);
        assert_eq!(merged.default_model.as_deref(), Some("claude-sonnet-4-5"));
        assert_eq!(merged.temperature, Some(0.0));
        assert_eq!(
            merged.lmstudio.base_url.as_deref(),
            Some("http://project:1234/v1")
        );
        assert_eq!(merged.lmstudio.timeout_secs, Some(3));
        assert_eq!(
            merged.provider.openai.unwrap().api_key.as_deref(),
            Some("global-key")
        );
    }
}
