//! # ragx Pipeline
//!
//! The orchestration layer of the ragx toolkit: [`RagPipeline`]
//! composes embedding, retrieval, optional reranking, prompt assembly
//! and generation into a single `query` call.

pub mod pipeline;
pub mod prompt;

pub use pipeline::{RagPipeline, RagPipelineBuilder, NO_RELEVANT_DOCUMENTS};
pub use prompt::PromptTemplate;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors carry which stage failed, so callers can tell a
/// retrieval problem from a generation problem.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(#[source] ragx_core::Error),

    #[error("Generation failed: {0}")]
    Generation(#[source] ragx_llm::Error),
}
