use crate::{ChatModel, ChunkStream, Error, Message, Result, Role};
use async_trait::async_trait;
use futures_util::stream;

/// Canned-answer backend for tests and demos.
///
/// Echoes back the query it finds after a `Question:` marker in the
/// first user message, so pipeline wiring can be verified end to end
/// without a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockChat;

impl MockChat {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_query(prompt: &str) -> &str {
        for line in prompt.lines() {
            if let Some((marker, rest)) = line.split_once(':') {
                if marker.trim_end().ends_with("Question") {
                    return rest.trim();
                }
            }
        }
        prompt
    }
}

#[async_trait]
impl ChatModel for MockChat {
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        if messages.is_empty() {
            return Err(Error::InvalidRequest("no messages provided".to_string()));
        }

        let prompt = messages
            .iter()
            .find(|m| m.role == Role::User)
            .or_else(|| messages.last())
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(format!(
            "Based on the provided context, this is a mock answer.\n\nOriginal query: {}",
            Self::extract_query(prompt)
        ))
    }

    async fn generate_stream(&self, messages: &[Message]) -> Result<ChunkStream> {
        let response = self.generate(messages).await?;
        let words: Vec<Result<String>> = response
            .split_whitespace()
            .map(|w| Ok(format!("{w} ")))
            .collect();
        Ok(Box::pin(stream::iter(words)))
    }
}
