use serde::{Deserialize, Serialize};

/// A scored candidate, decoupled from the document it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedItem {
    pub id: String,
    pub score: f64,
}

impl RankedItem {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Reorder/filter capability applied after retrieval.
///
/// Implementations are pure: no I/O, no internal state mutation. Empty
/// input yields empty output, and filtering everything out is a valid
/// outcome, not an error.
pub trait Ranker: Send + Sync {
    fn rank(&self, items: Vec<RankedItem>) -> Vec<RankedItem>;
}

/// Baseline ranker: stable sort by descending score.
///
/// Ties keep their input relative order and output length always equals
/// input length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreRanker;

impl ScoreRanker {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Ranker for ScoreRanker {
    fn rank(&self, mut items: Vec<RankedItem>) -> Vec<RankedItem> {
        // Vec::sort_by is stable, which is what keeps ties in input order.
        items.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items
    }
}
