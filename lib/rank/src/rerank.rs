//! Second-stage rankers.
//!
//! Both strategies here reshape an already-scored candidate list: one
//! by cutting below a score floor and collapsing duplicate ids, the
//! other by rescoring relative to the batch mean.

use crate::ranker::{RankedItem, Ranker};
use ahash::AHashSet;

/// Threshold reranker: drops low scores, then deduplicates by id.
///
/// Survivors are sorted by descending score and only the first
/// occurrence of each id (in that order) is kept. The dedup step is
/// literal id-uniqueness, not content-level diversity.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdReranker {
    score_threshold: f64,
}

impl ThresholdReranker {
    #[inline]
    #[must_use]
    pub fn new(score_threshold: f64) -> Self {
        Self { score_threshold }
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.score_threshold
    }
}

impl Ranker for ThresholdReranker {
    fn rank(&self, items: Vec<RankedItem>) -> Vec<RankedItem> {
        if items.is_empty() {
            return items;
        }

        let mut kept: Vec<RankedItem> = items
            .into_iter()
            .filter(|item| item.score >= self.score_threshold)
            .collect();

        kept.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut seen: AHashSet<String> = AHashSet::with_capacity(kept.len());
        kept.retain(|item| seen.insert(item.id.clone()));
        kept
    }
}

/// Saturation reranker: rescales each score against the batch mean.
///
/// `new_score = score * (score / max(mean, 0.001))`, so scores above
/// the mean grow and scores below it shrink. `k1` (term-frequency
/// saturation) and `b` (length normalization) are accepted for parity
/// with BM25-style configuration but are not applied by this formula:
/// true BM25 needs per-document term and length statistics that a bare
/// `(id, score)` list does not carry.
#[derive(Debug, Clone, Copy)]
pub struct SaturationReranker {
    k1: f64,
    b: f64,
}

impl SaturationReranker {
    /// Create a saturation reranker. Out-of-range parameters fall back
    /// to the conventional defaults (`k1 = 1.2`, `b = 0.75`).
    #[must_use]
    pub fn new(k1: f64, b: f64) -> Self {
        let k1 = if k1 <= 0.0 { 1.2 } else { k1 };
        let b = if !(0.0..=1.0).contains(&b) { 0.75 } else { b };
        Self { k1, b }
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> (f64, f64) {
        (self.k1, self.b)
    }
}

impl Default for SaturationReranker {
    fn default() -> Self {
        Self::new(1.2, 0.75)
    }
}

impl Ranker for SaturationReranker {
    fn rank(&self, items: Vec<RankedItem>) -> Vec<RankedItem> {
        if items.is_empty() {
            return items;
        }

        let mean = items.iter().map(|i| i.score).sum::<f64>() / items.len() as f64;
        let mut rescored: Vec<RankedItem> = items
            .into_iter()
            .map(|mut item| {
                item.score *= item.score / mean.max(0.001);
                item
            })
            .collect();

        rescored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rescored
    }
}
