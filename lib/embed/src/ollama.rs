use async_trait::async_trait;
use ragx_core::{Embedder, Error, Result, Vector};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for [`OllamaEmbedder`].
#[derive(Debug, Clone)]
pub struct OllamaEmbedderConfig {
    /// Ollama server address.
    pub base_url: String,
    /// Embedding model name, e.g. `nomic-embed-text`.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Vector dimension if known up front; `0` means probe the API once
    /// at construction.
    pub dimension: usize,
}

impl OllamaEmbedderConfig {
    /// Build from `OLLAMA_BASE_URL`, `OLLAMA_EMBED_MODEL`,
    /// `OLLAMA_TIMEOUT` (seconds) and `OLLAMA_EMBED_DIMENSION`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());
        let model = std::env::var("OLLAMA_EMBED_MODEL")
            .unwrap_or_else(|_| "qwen3-embedding:0.6b".to_string());
        let timeout = std::env::var("OLLAMA_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));
        let dimension = std::env::var("OLLAMA_EMBED_DIMENSION")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(768);

        Self {
            base_url,
            model,
            timeout,
            dimension,
        }
    }
}

impl Default for OllamaEmbedderConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f64>>,
}

/// Remote embedder backed by Ollama's `/api/embed` endpoint.
pub struct OllamaEmbedder {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimension: usize,
}

impl OllamaEmbedder {
    /// Create an embedder from `config`.
    ///
    /// When the configured dimension is `0`, a single probe request is
    /// made to learn it; if the probe fails the common 768 is assumed.
    pub async fn new(config: OllamaEmbedderConfig) -> Result<Self> {
        if config.model.is_empty() {
            return Err(Error::InvalidConfig(
                "Ollama embedding model is required".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        let mut embedder = Self {
            client,
            base_url: config.base_url,
            model: config.model,
            dimension: config.dimension,
        };

        if embedder.dimension == 0 {
            embedder.dimension = match embedder.probe_dimension().await {
                Ok(dim) => dim,
                Err(e) => {
                    debug!(error = %e, "dimension probe failed, assuming 768");
                    768
                }
            };
        }

        Ok(embedder)
    }

    async fn probe_dimension(&self) -> Result<usize> {
        let vectors = self.embed_batch(&["test".to_string()]).await?;
        match vectors.first() {
            Some(v) if v.dim() > 0 => Ok(v.dim()),
            _ => Err(Error::Backend(
                "probe returned no embedding".to_string(),
            )),
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Ollama embed request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!(
                "Ollama API returned status {status}: {body}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("failed to decode embed response: {e}")))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "mismatched number of embeddings: expected {}, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }

        Ok(parsed
            .embeddings
            .into_iter()
            .map(|emb| Vector::new(emb.into_iter().map(|v| v as f32).collect()))
            .collect())
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| Error::Embedding("no embedding returned".to_string()))
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        self.embed_batch(texts).await
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        // Only assert fields the environment is unlikely to override in CI.
        let config = OllamaEmbedderConfig {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout: Duration::from_secs(30),
            dimension: 768,
        };
        assert_eq!(config.dimension, 768);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_empty_model_rejected() {
        let config = OllamaEmbedderConfig {
            base_url: "http://localhost:11434".to_string(),
            model: String::new(),
            timeout: Duration::from_secs(1),
            dimension: 768,
        };
        assert!(matches!(
            OllamaEmbedder::new(config).await,
            Err(Error::InvalidConfig(_))
        ));
    }
}
