//! LM Studio model discovery.
//!
//! Queries the OpenAI-compatible `GET {base_url}/models` endpoint of a local
//! LM Studio server. Discovery is best-effort: every failure is logged and
//! degrades to an empty list, and nothing is cached between calls since the
//! set of loaded models changes while the server runs.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::constants::DISCOVERY_TIMEOUT_SECS;

/// A source of locally available model identifiers.
pub trait ModelSource {
    /// Returns model identifiers in the order the source reports them.
    /// Must not fail; an unavailable source yields an empty list.
    fn fetch_models(&self) -> Vec<String>;
}

/// Why a discovery request produced no models.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid JSON from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected response shape from {url}: {reason}")]
    Shape { url: String, reason: &'static str },
}

/// HTTP discovery against a local OpenAI-compatible server.
#[derive(Debug, Clone)]
pub struct LocalDiscovery {
    base_url: Option<String>,
    timeout: Duration,
}

impl LocalDiscovery {
    /// Creates a discovery client. An empty or blank `base_url` disables
    /// discovery entirely.
    pub fn new(base_url: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string());
        Self {
            base_url,
            timeout: Duration::from_secs(DISCOVERY_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The `/models` URL queried, or `None` when discovery is disabled.
    pub fn endpoint(&self) -> Option<String> {
        self.base_url.as_ref().map(|base| format!("{base}/models"))
    }

    /// Performs one discovery request, reporting why it failed.
    ///
    /// Returns `Ok(vec![])` without any request when no base URL is set.
    pub fn try_fetch(&self) -> Result<Vec<String>, DiscoveryError> {
        let Some(url) = self.endpoint() else {
            return Ok(Vec::new());
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(DiscoveryError::Client)?;

        let resp = client
            .get(&url)
            .send()
            .map_err(|source| DiscoveryError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status { url, status });
        }

        let body = resp.text().map_err(|source| DiscoveryError::Transport {
            url: url.clone(),
            source,
        })?;
        let json: Value = serde_json::from_str(&body).map_err(|source| {
            DiscoveryError::Malformed {
                url: url.clone(),
                source,
            }
        })?;

        parse_model_ids(&json).map_err(|reason| DiscoveryError::Shape { url, reason })
    }
}

impl ModelSource for LocalDiscovery {
    fn fetch_models(&self) -> Vec<String> {
        match self.try_fetch() {
            Ok(models) => {
                tracing::debug!("discovered {} local models", models.len());
                models
            }
            Err(err) => {
                tracing::debug!("local model discovery unavailable: {err}");
                Vec::new()
            }
        }
    }
}

/// Extracts `data[*].id` from a `/models` response body.
///
/// A missing `data` field means no models; entries without a non-empty
/// string `id` are skipped.
fn parse_model_ids(json: &Value) -> Result<Vec<String>, &'static str> {
    let obj = json.as_object().ok_or("body is not a JSON object")?;
    let Some(data) = obj.get("data") else {
        return Ok(Vec::new());
    };
    let entries = data.as_array().ok_or("`data` is not an array")?;

    Ok(entries
        .iter()
        .filter_map(|m| m.get("id").and_then(Value::as_str))
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_model_ids() {
        let body = json!({
            "object": "list",
            "data": [
                {"id": "qwen3-8b", "object": "model"},
                {"object": "model"},
                {"id": ""},
                {"id": 42},
                {"id": "Llama-3.2-3B"}
            ]
        });
        assert_eq!(
            parse_model_ids(&body).unwrap(),
            vec!["qwen3-8b".to_string(), "Llama-3.2-3B".to_string()]
        );
    }

    #[test]
    fn test_parse_missing_data() {
        assert!(parse_model_ids(&json!({"object": "list"})).unwrap().is_empty());
    }

    #[test]
    fn test_parse_bad_shape() {
        assert!(parse_model_ids(&json!([1, 2])).is_err());
        assert!(parse_model_ids(&json!({"data": "nope"})).is_err());
    }

    #[test]
    fn test_endpoint_normalization() {
        let d = LocalDiscovery::new(Some(" http://localhost:1234/v1/ "));
        assert_eq!(
            d.endpoint().as_deref(),
            Some("http://localhost:1234/v1/models")
        );
        assert!(LocalDiscovery::new(Some("   ")).endpoint().is_none());
        assert!(LocalDiscovery::new(None).endpoint().is_none());
    }

    #[test]
    fn test_disabled_discovery_skips_request() {
        let d = LocalDiscovery::new(None);
        assert!(d.try_fetch().unwrap().is_empty());
        assert!(d.fetch_models().is_empty());
    }
}
