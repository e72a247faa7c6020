//! # ragx Rank
//!
//! Post-retrieval ranking for the ragx toolkit.
//!
//! Rankers operate on bare `(id, score)` pairs rather than full
//! documents, so they can reorder any scored candidate list regardless
//! of where it came from:
//!
//! - [`ScoreRanker`] - stable descending sort by score
//! - [`ThresholdReranker`] - score floor plus id-deduplication
//! - [`SaturationReranker`] - amplifies above-mean scores, suppresses the rest

pub mod ranker;
pub mod rerank;

pub use ranker::{RankedItem, Ranker, ScoreRanker};
pub use rerank::{SaturationReranker, ThresholdReranker};
