use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A text fragment stored for retrieval.
///
/// Identity is the `id`; re-adding a document with an existing id
/// replaces its content, metadata and embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    /// Opaque key-value metadata, not interpreted by the store.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Document {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A scored document produced by a retrieval query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub document: Document,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let doc = Document::new("d1", "hello world")
            .with_metadata(HashMap::from([("source".to_string(), json!("unit"))]));
        assert_eq!(doc.id, "d1");
        assert_eq!(doc.content, "hello world");
        assert_eq!(doc.metadata.get("source"), Some(&json!("unit")));
    }
}
