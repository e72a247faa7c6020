use crate::{Error, PromptTemplate, Result};
use ragx_core::{Document, MemoryStore, RetrievalResult};
use ragx_llm::{ChatModel, Message};
use ragx_rank::{RankedItem, Ranker};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Answer returned when retrieval finds nothing; generation is skipped
/// entirely in that case.
pub const NO_RELEVANT_DOCUMENTS: &str = "No relevant documents found.";

/// Builder for [`RagPipeline`]. The store and the chat model are
/// mandatory; a missing collaborator is a configuration error at
/// `build` time, so a constructed pipeline can always run.
#[derive(Default)]
pub struct RagPipelineBuilder {
    store: Option<Arc<MemoryStore>>,
    model: Option<Arc<dyn ChatModel>>,
    ranker: Option<Arc<dyn Ranker>>,
    template: Option<PromptTemplate>,
}

impl RagPipelineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store(mut self, store: Arc<MemoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Optional second-stage ranker applied to retrieved results before
    /// context assembly.
    #[must_use]
    pub fn ranker(mut self, ranker: Arc<dyn Ranker>) -> Self {
        self.ranker = Some(ranker);
        self
    }

    #[must_use]
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(self) -> Result<RagPipeline> {
        let store = self
            .store
            .ok_or_else(|| Error::Config("retrieval store is not set".to_string()))?;
        let model = self
            .model
            .ok_or_else(|| Error::Config("generation model is not set".to_string()))?;

        Ok(RagPipeline {
            store,
            model,
            ranker: self.ranker,
            template: self.template.unwrap_or_default(),
        })
    }
}

/// End-to-end RAG orchestrator.
///
/// `query` embeds the question, retrieves the top-K most similar
/// documents, optionally reranks them, assembles the retrieved content
/// into a prompt and asks the chat model for an answer. Errors are
/// tagged with the failing stage; there are no internal retries and no
/// fallback answers beyond [`NO_RELEVANT_DOCUMENTS`].
pub struct RagPipeline {
    store: Arc<MemoryStore>,
    model: Arc<dyn ChatModel>,
    ranker: Option<Arc<dyn Ranker>>,
    template: PromptTemplate,
}

impl RagPipeline {
    #[must_use]
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::new()
    }

    /// Answer `query` using the `top_k` most relevant stored documents.
    pub async fn query(&self, query: &str, top_k: usize) -> Result<String> {
        let mut results = self
            .store
            .retrieve(query, top_k)
            .await
            .map_err(Error::Retrieval)?;

        if let Some(ranker) = &self.ranker {
            results = Self::apply_ranker(ranker.as_ref(), results);
        }

        if results.is_empty() {
            info!(query, "no relevant documents, skipping generation");
            return Ok(NO_RELEVANT_DOCUMENTS.to_string());
        }
        debug!(
            count = results.len(),
            ids = ?results.iter().map(|r| r.document.id.as_str()).collect::<Vec<_>>(),
            "retrieved documents"
        );

        let context = results
            .iter()
            .map(|r| r.document.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self.template.build(&context, query);
        let messages = [Message::user(prompt)];

        let answer = self
            .model
            .generate(&messages)
            .await
            .map_err(Error::Generation)?;
        info!(query, chars = answer.len(), "query answered");
        Ok(answer)
    }

    /// Reorder/filter retrieved results through the ranker, then map the
    /// surviving ids back onto their documents.
    fn apply_ranker(ranker: &dyn Ranker, results: Vec<RetrievalResult>) -> Vec<RetrievalResult> {
        let mut by_id: HashMap<String, Document> = results
            .iter()
            .map(|r| (r.document.id.clone(), r.document.clone()))
            .collect();

        let items: Vec<RankedItem> = results
            .into_iter()
            .map(|r| RankedItem::new(r.document.id, r.score))
            .collect();

        ranker
            .rank(items)
            .into_iter()
            .filter_map(|item| {
                by_id.remove(&item.id).map(|document| RetrievalResult {
                    document,
                    score: item.score,
                })
            })
            .collect()
    }

    /// Add documents to the underlying store.
    pub async fn add_documents(&self, documents: Vec<Document>) -> Result<()> {
        self.store
            .add_documents(documents)
            .await
            .map_err(Error::Retrieval)
    }

    /// Delete a document from the underlying store. Deleting an absent
    /// id is a no-op.
    pub fn delete_document(&self, id: &str) -> bool {
        self.store.delete_document(id)
    }
}
