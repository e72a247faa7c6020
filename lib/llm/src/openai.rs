use crate::{ChatModel, ChunkStream, Error, Message, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the [`OpenAi`] chat backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    /// API root, overridable for OpenAI-compatible servers.
    pub base_url: String,
}

impl OpenAiConfig {
    /// Build from `OPENAI_API_KEY`, `OPENAI_MODEL` and
    /// `OPENAI_BASE_URL`. Returns `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        let model =
            std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        Some(Self {
            api_key,
            model,
            base_url,
        })
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    max_completion_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Chat backend for OpenAI-compatible chat completion APIs.
pub struct OpenAi {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAi {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::InvalidConfig(
                "OpenAI API key is required".to_string(),
            ));
        }
        if config.model.is_empty() {
            return Err(Error::InvalidConfig("OpenAI model is required".to_string()));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatModel for OpenAi {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = CompletionRequest {
            model: &self.config.model,
            messages,
            max_completion_tokens: 1000,
            temperature: 0.7,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Backend(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!(
                "OpenAI API returned status {status}: {body}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Backend(format!("failed to decode completion response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Backend("completion response had no choices".to_string()))?;
        debug!(model = %self.config.model, chars = choice.message.content.len(), "generation complete");
        Ok(choice.message.content)
    }

    async fn generate_stream(&self, _messages: &[Message]) -> Result<ChunkStream> {
        Err(Error::Unsupported(
            "streaming is not implemented for the OpenAI backend",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        let config = OpenAiConfig {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        };
        assert!(matches!(OpenAi::new(config), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_completion_response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[tokio::test]
    async fn test_stream_is_unsupported() {
        let backend = OpenAi::new(OpenAiConfig {
            api_key: "test-key".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        })
        .unwrap();
        let err = backend.generate_stream(&[Message::user("hi")]).await;
        assert!(matches!(err, Err(Error::Unsupported(_))));
    }
}
