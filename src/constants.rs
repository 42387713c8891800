//! Centralized constants for modelsel.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "modelsel";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "modelsel.toml";

/// Environment variable filter for log output.
pub const LOG_ENV: &str = "MODELSEL_LOG";

/// Log level used when `MODELSEL_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// --- Completion defaults ---

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f64 = 0.0;

// --- Streaming ---

/// Number of buffered characters that forces a flush without a newline.
pub const DEFAULT_BUFFER_LIMIT: usize = 60;

// --- LM Studio discovery ---

/// Environment variable holding the LM Studio OpenAI-compatible base URL.
pub const LMSTUDIO_BASE_URL_ENV: &str = "LMSTUDIO_BASE_URL";

/// Placeholder key sent to LM Studio, which does not check it.
pub const LMSTUDIO_API_KEY: &str = "lm-studio";

/// Timeout for a single `/models` discovery request.
pub const DISCOVERY_TIMEOUT_SECS: u64 = 3;

// --- Descriptor parameter keys ---

/// Model identifier passed to the client constructor.
pub const PARAM_MODEL: &str = "model";

/// Custom endpoint for OpenAI-compatible servers.
pub const PARAM_BASE_URL: &str = "base_url";

/// Explicit API key carried by the descriptor.
pub const PARAM_API_KEY: &str = "api_key";
