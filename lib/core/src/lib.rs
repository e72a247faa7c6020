//! # ragx Core
//!
//! Core library for the ragx retrieval toolkit.
//!
//! This crate provides the fundamental data structures and the retrieval
//! engine:
//!
//! - [`Vector`] - Dense embedding vector with cosine similarity
//! - [`Document`] - A text fragment with ID and metadata
//! - [`Embedder`] - The text-to-vector capability consumed by the store
//! - [`MemoryStore`] - Concurrency-safe in-memory store with exact top-K search
//!
//! ## Example
//!
//! ```rust,ignore
//! use ragx_core::{Document, MemoryStore};
//!
//! let store = MemoryStore::new(embedder)?;
//! store
//!     .add_documents(vec![Document::new("doc1", "the cat sat on the mat")])
//!     .await?;
//! let results = store.retrieve("cat", 5).await?;
//! ```

pub mod document;
pub mod embedder;
pub mod error;
pub mod store;
pub mod vector;

pub use document::{Document, RetrievalResult};
pub use embedder::Embedder;
pub use error::{Error, Result};
pub use store::MemoryStore;
pub use vector::Vector;
