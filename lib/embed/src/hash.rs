use async_trait::async_trait;
use ragx_core::{Embedder, Result, Vector};
use std::collections::HashMap;

/// Deterministic bag-of-words embedder.
///
/// Each word hashes to a fixed bucket of the output vector; bucket
/// values are term frequencies normalized by the most frequent word,
/// and the final vector is L2-normalized. The same text always maps to
/// the same vector, which makes similarity scores reproducible without
/// any model or network.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    #[inline]
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// FNV-1a over the word bytes, folded into a bucket index.
    fn bucket(&self, word: &str) -> usize {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
        let mut hash = FNV_OFFSET;
        for byte in word.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        (hash % self.dimension as u64) as usize
    }

    fn embed(&self, text: &str) -> Vector {
        let mut data = vec![0.0f32; self.dimension];
        let words = Self::tokenize(text);
        if words.is_empty() {
            return Vector::new(data);
        }

        let mut freqs: HashMap<String, f32> = HashMap::new();
        for word in words {
            *freqs.entry(word).or_insert(0.0) += 1.0;
        }
        let max_freq = freqs.values().copied().fold(0.0f32, f32::max);

        for (word, freq) in &freqs {
            data[self.bucket(word)] += freq / max_freq;
        }

        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vector> {
        Ok(self.embed(text))
    }

    async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dimension_and_determinism() {
        let embedder = HashEmbedder::new(128);
        let v1 = embedder.embed_text("the cat sat on the mat").await.unwrap();
        let v2 = embedder.embed_text("the cat sat on the mat").await.unwrap();
        assert_eq!(v1.dim(), 128);
        assert_eq!(v1, v2);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let embedder = HashEmbedder::new(16);
        let v = embedder.embed_text("").await.unwrap();
        assert!(v.as_slice().iter().all(|x| *x == 0.0));
        let punct = embedder.embed_text("... !!!").await.unwrap();
        assert!(punct.as_slice().iter().all(|x| *x == 0.0));
    }

    #[tokio::test]
    async fn test_output_is_unit_length() {
        let embedder = HashEmbedder::new(64);
        let v = embedder.embed_text("dogs bark loudly").await.unwrap();
        let norm: f64 = v
            .as_slice()
            .iter()
            .map(|x| f64::from(*x) * f64::from(*x))
            .sum::<f64>()
            .sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_shared_words_raise_similarity() {
        let embedder = HashEmbedder::new(256);
        let cat1 = embedder.embed_text("the cat sat").await.unwrap();
        let cat2 = embedder.embed_text("cat sat quietly").await.unwrap();
        let dogs = embedder.embed_text("dogs bark loudly").await.unwrap();
        assert!(cat1.cosine_similarity(&cat2) > cat1.cosine_similarity(&dogs));
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let embedder = HashEmbedder::new(32);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let batch = embedder.embed_texts(&texts).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed_text("alpha").await.unwrap());
        assert_eq!(batch[1], embedder.embed_text("beta").await.unwrap());
    }
}
