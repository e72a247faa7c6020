use crate::{Result, Vector};
use async_trait::async_trait;

/// Text-to-vector capability consumed by [`crate::MemoryStore`].
///
/// Implementations must be deterministic for equal input given fixed
/// internal state, and `dimension()` is fixed at construction.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed_text(&self, text: &str) -> Result<Vector>;

    /// Embed a batch of texts, preserving order.
    ///
    /// All-or-nothing: if any element fails, the whole call fails and
    /// no vectors are returned.
    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Dimension of every vector this embedder produces.
    fn dimension(&self) -> usize;
}
