//! # ragx
//!
//! A retrieval-augmented generation toolkit: in-memory vector
//! retrieval, pluggable reranking, and swappable embedding/chat
//! backends behind small capability traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ragx::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new(Arc::new(HashEmbedder::new(256)))?);
//! store
//!     .add_documents(vec![
//!         Document::new("a", "the cat sat on the mat"),
//!         Document::new("b", "dogs bark loudly at night"),
//!     ])
//!     .await?;
//!
//! let pipeline = RagPipeline::builder()
//!     .store(store)
//!     .model(Arc::new(MockChat::new()))
//!     .build()?;
//!
//! let answer = pipeline.query("where did the cat sit?", 3).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! ragx is composed of several crates:
//!
//! - [`ragx-core`](https://docs.rs/ragx-core) - Documents, the embedding contract, the vector store
//! - [`ragx-rank`](https://docs.rs/ragx-rank) - Post-retrieval ranking strategies
//! - [`ragx-embed`](https://docs.rs/ragx-embed) - Embedder implementations (hashed bag-of-words, Ollama)
//! - [`ragx-llm`](https://docs.rs/ragx-llm) - Chat backends (Ollama, OpenAI-compatible, mock)
//! - [`ragx-pipeline`](https://docs.rs/ragx-pipeline) - The query orchestrator

// Re-export core types
pub use ragx_core::{Document, Embedder, MemoryStore, RetrievalResult, Vector};

// Re-export ranking
pub use ragx_rank::{RankedItem, Ranker, SaturationReranker, ScoreRanker, ThresholdReranker};

// Re-export embedders
pub use ragx_embed::{HashEmbedder, OllamaEmbedder, OllamaEmbedderConfig};

// Re-export chat backends
pub use ragx_llm::{ChatModel, ChunkStream, Message, MockChat, Ollama, OllamaConfig, OpenAi, OpenAiConfig, Role};

// Re-export orchestration
pub use ragx_pipeline::{PromptTemplate, RagPipeline, RagPipelineBuilder, NO_RELEVANT_DOCUMENTS};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ChatModel, ChunkStream, Document, Embedder, HashEmbedder, MemoryStore, Message, MockChat,
        Ollama, OllamaConfig, OllamaEmbedder, OllamaEmbedderConfig, OpenAi, OpenAiConfig,
        PromptTemplate, RagPipeline, RankedItem, Ranker, RetrievalResult, Role,
        SaturationReranker, ScoreRanker, ThresholdReranker, Vector, NO_RELEVANT_DOCUMENTS,
    };
}
