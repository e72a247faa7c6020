use crate::{ChatModel, ChunkStream, Error, Message, Result};
use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for the [`Ollama`] chat backend.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Ollama server address.
    pub base_url: String,
    /// Model name, e.g. `llama3` or `qwen2.5:3b-instruct`.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OllamaConfig {
    /// Build from `OLLAMA_BASE_URL`, `OLLAMA_MODEL` and
    /// `OLLAMA_TIMEOUT` (seconds).
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:11434".to_string());
        let model = std::env::var("OLLAMA_MODEL")
            .unwrap_or_else(|_| "qwen2.5:3b-instruct".to_string());
        let timeout = std::env::var("OLLAMA_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            base_url,
            model,
            timeout,
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: ChatResponseMessage,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: String,
}

#[derive(Debug, Default, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

/// Chat backend talking to Ollama's `/api/chat` endpoint.
pub struct Ollama {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl Ollama {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        if config.model.is_empty() {
            return Err(Error::InvalidConfig("Ollama model is required".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url,
            model: config.model,
        })
    }

    async fn send_chat(&self, messages: &[Message], stream: bool) -> Result<reqwest::Response> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages,
            stream,
            options: serde_json::json!({ "temperature": 0.7 }),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("Ollama chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!(
                "Ollama API returned status {status}: {body}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatModel for Ollama {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let response = self.send_chat(messages, false).await?;
        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("failed to decode chat response: {e}")))?;

        if !parsed.error.is_empty() {
            return Err(Error::Backend(format!("Ollama API error: {}", parsed.error)));
        }
        debug!(model = %self.model, chars = parsed.message.content.len(), "generation complete");
        Ok(parsed.message.content)
    }

    async fn generate_stream(&self, messages: &[Message]) -> Result<ChunkStream> {
        let response = self.send_chat(messages, true).await?;

        // Ollama streams newline-delimited JSON frames. A network chunk
        // can carry any number of complete lines plus a partial tail, so
        // lines are drained through a carry-over buffer. The body ends
        // right after the `done` frame; dropping the stream aborts the
        // request.
        let mut buffer = String::new();
        let stream = response
            .bytes_stream()
            .map(move |chunk| -> Result<String> {
                let bytes =
                    chunk.map_err(|e| Error::Backend(format!("Ollama stream failed: {e}")))?;
                buffer.push_str(&String::from_utf8_lossy(&bytes));

                let mut content = String::new();
                while let Some(line_end) = buffer.find('\n') {
                    let line = buffer[..line_end].trim().to_string();
                    buffer.drain(..=line_end);
                    if line.is_empty() {
                        continue;
                    }

                    let frame: ChatResponse = serde_json::from_str(&line).map_err(|e| {
                        Error::Backend(format!("failed to decode stream frame: {e}"))
                    })?;
                    if !frame.error.is_empty() {
                        return Err(Error::Backend(format!("Ollama API error: {}", frame.error)));
                    }
                    content.push_str(&frame.message.content);
                    if frame.done {
                        buffer.clear();
                        break;
                    }
                }
                Ok(content)
            })
            .try_filter(|content| futures_util::future::ready(!content.is_empty()));

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_rejected() {
        let config = OllamaConfig {
            base_url: "http://localhost:11434".to_string(),
            model: String::new(),
            timeout: Duration::from_secs(1),
        };
        assert!(matches!(Ollama::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![Message::user("hi")];
        let request = ChatRequest {
            model: "llama3",
            messages: &messages,
            stream: false,
            options: serde_json::json!({ "temperature": 0.7 }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["options"]["temperature"], 0.7);
    }

    #[test]
    fn test_chat_response_tolerates_missing_fields() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.message.content.is_empty());
        assert!(!parsed.done);
        assert!(parsed.error.is_empty());

        let frame: ChatResponse =
            serde_json::from_str(r#"{"message":{"role":"assistant","content":"hi"},"done":true}"#)
                .unwrap();
        assert_eq!(frame.message.content, "hi");
        assert!(frame.done);
    }
}
