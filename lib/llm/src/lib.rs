//! # ragx LLM
//!
//! Chat generation backends for the ragx toolkit:
//!
//! - [`Ollama`] - local models via Ollama's `/api/chat`, with NDJSON
//!   streaming
//! - [`OpenAi`] - OpenAI-compatible chat completion APIs
//! - [`MockChat`] - canned answers for tests and demos
//!
//! Streaming is exposed as a chunk [`Stream`](futures_util::Stream)
//! rather than a callback; dropping the stream cancels the underlying
//! request.

pub mod mock;
pub mod ollama;
pub mod openai;

pub use mock::MockChat;
pub use ollama::{Ollama, OllamaConfig};
pub use openai::{OpenAi, OpenAiConfig};

use async_trait::async_trait;
use futures_util::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend unavailable: {0}")]
    Backend(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[inline]
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Ordered stream of generated text fragments.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Chat generation capability.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete reply for the conversation.
    async fn generate(&self, messages: &[Message]) -> Result<String>;

    /// Generate a reply as a stream of fragments in production order.
    ///
    /// Dropping the returned stream aborts generation promptly.
    async fn generate_stream(&self, messages: &[Message]) -> Result<ChunkStream>;
}
