//! # ragx Embed
//!
//! [`ragx_core::Embedder`] implementations:
//!
//! - [`HashEmbedder`] - deterministic hashed bag-of-words vectors, no
//!   network and no model; good for tests, demos and smoke runs
//! - [`OllamaEmbedder`] - remote embeddings via Ollama's `/api/embed`

pub mod hash;
pub mod ollama;

pub use hash::HashEmbedder;
pub use ollama::{OllamaEmbedder, OllamaEmbedderConfig};
