//! End-to-end RAG walkthrough using the offline embedder and the mock
//! chat backend, so it runs without any model server.
//!
//! ```bash
//! cargo run --example basic_rag
//! ```
//!
//! Point it at a real stack by swapping in `OllamaEmbedder` and
//! `Ollama` (see their `from_env` configs).

use ragx::prelude::*;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(MemoryStore::new(Arc::new(HashEmbedder::new(256)))?);
    store
        .add_documents(vec![
            Document::new(
                "rust-intro",
                "Rust is a systems programming language focused on safety and performance.",
            ),
            Document::new(
                "rag-intro",
                "Retrieval-augmented generation answers questions by retrieving relevant \
                 documents and conditioning a language model on them.",
            ),
            Document::new(
                "cosine",
                "Cosine similarity measures the angle between two vectors and ranges \
                 from -1 to 1.",
            ),
        ])
        .await?;
    info!(count = store.len(), "documents indexed");

    let pipeline = RagPipeline::builder()
        .store(store)
        .model(Arc::new(MockChat::new()))
        .ranker(Arc::new(ThresholdReranker::new(0.1)))
        .build()?;

    for question in [
        "What is retrieval-augmented generation?",
        "How does cosine similarity work?",
        "What color is the sky?",
    ] {
        let answer = pipeline.query(question, 2).await?;
        println!("Q: {question}\nA: {answer}\n");
    }

    Ok(())
}
