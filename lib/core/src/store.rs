use crate::{Document, Embedder, Error, Result, RetrievalResult, Vector};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct Entry {
    document: Document,
    vector: Vector,
}

/// Concurrency-safe in-memory vector store with exact top-K retrieval.
///
/// Documents are embedded through the injected [`Embedder`] and scored
/// with cosine similarity over a linear scan. Reads run in parallel
/// under a shared lock; writes take the lock exclusively, and embedding
/// always happens outside the lock so hold times stay bounded by the
/// map mutation itself.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
    embedder: Arc<dyn Embedder>,
    dimension: usize,
}

impl MemoryStore {
    /// Create a store bound to an embedder.
    ///
    /// The store's dimension is taken from the embedder once and is
    /// immutable for the lifetime of the store.
    pub fn new(embedder: Arc<dyn Embedder>) -> Result<Self> {
        let dimension = embedder.dimension();
        if dimension == 0 {
            return Err(Error::InvalidConfig(
                "embedder reports zero dimension".to_string(),
            ));
        }
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            embedder,
            dimension,
        })
    }

    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Get a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Document> {
        self.entries.read().get(id).map(|e| e.document.clone())
    }

    /// Add documents, overwriting any existing ids.
    ///
    /// Contents are embedded in one batch call before the write lock is
    /// taken. The batch is atomic: a failed embedding call or a
    /// dimension mismatch commits nothing.
    pub async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let vectors = self.embedder.embed_texts(&texts).await?;

        if vectors.len() != documents.len() {
            return Err(Error::Embedding(format!(
                "embedder returned {} vectors for {} documents",
                vectors.len(),
                documents.len()
            )));
        }
        for vector in &vectors {
            if vector.dim() != self.dimension {
                return Err(Error::DimensionMismatch {
                    expected: self.dimension,
                    actual: vector.dim(),
                });
            }
        }

        let mut entries = self.entries.write();
        for (document, vector) in documents.into_iter().zip(vectors) {
            entries.insert(document.id.clone(), Entry { document, vector });
        }
        Ok(())
    }

    /// Delete a document by id. Deleting an absent id is a no-op.
    ///
    /// Returns whether the document was present.
    pub fn delete_document(&self, id: &str) -> bool {
        self.entries.write().remove(id).is_some()
    }

    /// Retrieve the `top_k` documents most similar to `query`.
    ///
    /// Results are sorted by non-increasing score; equal scores break by
    /// ascending document id so output is deterministic. `top_k == 0`
    /// and an empty store both yield an empty list, not an error.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<RetrievalResult>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        // Query embedding needs no store lock at all.
        let query_vector = self.embedder.embed_text(query).await?;
        if query_vector.dim() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: query_vector.dim(),
            });
        }

        let entries = self.entries.read();
        let mut scored: Vec<RetrievalResult> = Vec::with_capacity(entries.len());
        for entry in entries.values() {
            // Enforced at insertion, so a mismatch here is a broken
            // internal invariant rather than a bad query.
            if entry.vector.dim() != query_vector.dim() {
                return Err(Error::DimensionMismatch {
                    expected: query_vector.dim(),
                    actual: entry.vector.dim(),
                });
            }
            let score = query_vector.cosine_similarity(&entry.vector);
            debug!(id = %entry.document.id, score, "scored candidate");
            scored.push(RetrievalResult {
                document: entry.document.clone(),
                score,
            });
        }
        drop(entries);

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.document.id.cmp(&b.document.id))
        });
        scored.truncate(top_k);

        debug!(count = scored.len(), top_k, "retrieval complete");
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Maps each known word onto its own axis; unknown words are ignored.
    struct AxisEmbedder {
        vocab: Vec<&'static str>,
    }

    impl AxisEmbedder {
        fn new(vocab: Vec<&'static str>) -> Self {
            Self { vocab }
        }

        fn embed(&self, text: &str) -> Vector {
            let mut data = vec![0.0f32; self.vocab.len()];
            for word in text.to_lowercase().split_whitespace() {
                if let Some(i) = self.vocab.iter().position(|w| *w == word) {
                    data[i] += 1.0;
                }
            }
            Vector::new(data)
        }
    }

    #[async_trait]
    impl Embedder for AxisEmbedder {
        async fn embed_text(&self, text: &str) -> Result<Vector> {
            Ok(self.embed(text))
        }

        async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
            Ok(texts.iter().map(|t| self.embed(t)).collect())
        }

        fn dimension(&self) -> usize {
            self.vocab.len()
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed_text(&self, _text: &str) -> Result<Vector> {
            Err(Error::Embedding("simulated failure".to_string()))
        }

        async fn embed_texts(&self, _texts: &[String]) -> Result<Vec<Vector>> {
            Err(Error::Embedding("simulated failure".to_string()))
        }

        fn dimension(&self) -> usize {
            4
        }
    }

    fn test_store() -> MemoryStore {
        let embedder = Arc::new(AxisEmbedder::new(vec![
            "cat", "sat", "dogs", "bark", "loudly", "the",
        ]));
        MemoryStore::new(embedder).unwrap()
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let embedder = Arc::new(AxisEmbedder::new(vec![]));
        assert!(matches!(
            MemoryStore::new(embedder),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_retrieve_ranks_by_similarity() {
        let store = test_store();
        store
            .add_documents(vec![
                Document::new("a", "the cat sat"),
                Document::new("b", "dogs bark loudly"),
            ])
            .await
            .unwrap();

        let results = store.retrieve("cat sat", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.id, "a");
        assert!(results[0].score > 0.5);
    }

    #[tokio::test]
    async fn test_retrieve_empty_store() {
        let store = test_store();
        let results = store.retrieve("anything", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_top_k_zero() {
        let store = test_store();
        store
            .add_documents(vec![Document::new("a", "the cat sat")])
            .await
            .unwrap();
        let results = store.retrieve("cat", 0).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_caps_at_store_size() {
        let store = test_store();
        store
            .add_documents(vec![
                Document::new("a", "the cat sat"),
                Document::new("b", "dogs bark loudly"),
            ])
            .await
            .unwrap();
        let results = store.retrieve("cat", 100).await.unwrap();
        assert_eq!(results.len(), 2);
        // Non-increasing scores.
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_tie_break_by_ascending_id() {
        let store = test_store();
        // Identical content scores identically; order must come from ids.
        store
            .add_documents(vec![
                Document::new("z", "cat sat"),
                Document::new("a", "cat sat"),
                Document::new("m", "cat sat"),
            ])
            .await
            .unwrap();
        let results = store.retrieve("cat sat", 3).await.unwrap();
        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }

    #[tokio::test]
    async fn test_add_empty_batch_is_noop() {
        let store = test_store();
        store.add_documents(vec![]).await.unwrap();
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_readd_overwrites() {
        let store = test_store();
        store
            .add_documents(vec![Document::new("a", "the cat sat")])
            .await
            .unwrap();
        store
            .add_documents(vec![Document::new("a", "dogs bark loudly")])
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().content, "dogs bark loudly");

        // The embedding was replaced too: the old content no longer matches.
        let results = store.retrieve("dogs bark", 1).await.unwrap();
        assert_eq!(results[0].document.id, "a");
        assert!(results[0].score > 0.5);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = test_store();
        store
            .add_documents(vec![Document::new("a", "the cat sat")])
            .await
            .unwrap();

        assert!(store.delete_document("a"));
        assert!(!store.delete_document("a"));
        assert!(!store.delete_document("never-existed"));
        assert_eq!(store.len(), 0);

        let results = store.retrieve("cat", 5).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_commits_nothing() {
        let store = MemoryStore::new(Arc::new(FailingEmbedder)).unwrap();
        let err = store
            .add_documents(vec![Document::new("a", "text")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Embedding(_)));
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_reads_and_writes() {
        let store = Arc::new(test_store());
        store
            .add_documents(vec![
                Document::new("a", "the cat sat"),
                Document::new("b", "dogs bark loudly"),
            ])
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    let results = store.retrieve("cat", 2).await.unwrap();
                    assert!(results.len() <= 2);
                } else {
                    store
                        .add_documents(vec![Document::new(format!("extra-{i}"), "cat sat")])
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len(), 2 + 4);
    }
}
