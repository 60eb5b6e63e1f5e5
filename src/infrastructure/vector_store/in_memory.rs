use std::cmp::Ordering;
use tracing::instrument;

use crate::application::CallPolicy;
use crate::domain::ports::{Embedder, VectorStore};
use crate::domain::{Document, DomainError, Embedding, EmbeddingPurpose, SearchResult};

/// Index-aligned documents and embeddings, scanned exhaustively on search.
///
/// Filled once while the corpus is indexed and shared read-only after
/// that, so searches need no locking.
#[derive(Debug, Default, Clone)]
pub struct InMemoryVectorStore {
    entries: Vec<(Document, Embedding)>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Embeds every document, one call each, in corpus order.
    ///
    /// A failed embedding call aborts the build. A vector whose dimension
    /// differs from the first one is skipped with a warning.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn build(
        embedder: &dyn Embedder,
        policy: &CallPolicy,
        documents: Vec<Document>,
    ) -> Result<Self, DomainError> {
        let mut store = Self::new();

        for document in documents {
            let embedding = policy
                .run("embed document", || {
                    embedder.embed(&document.text, EmbeddingPurpose::Document)
                })
                .await?;

            if let Err(e) = store.insert(document, embedding) {
                tracing::warn!(error = %e, "skipping document");
            }
        }

        tracing::info!(size = store.len(), "embedding store built");
        Ok(store)
    }

    /// Appends an entry. All embeddings must share one dimension.
    pub fn insert(&mut self, document: Document, embedding: Embedding) -> Result<(), DomainError> {
        if let Some(expected) = self.dimension() {
            if embedding.dimension() != expected {
                return Err(DomainError::validation(format!(
                    "embedding dimension {} does not match store dimension {expected}",
                    embedding.dimension()
                )));
            }
        }

        self.entries.push((document, embedding));
        Ok(())
    }

    pub fn dimension(&self) -> Option<usize> {
        self.entries.first().map(|(_, e)| e.dimension())
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|(d, _)| d)
    }
}

impl VectorStore for InMemoryVectorStore {
    /// Equal scores keep insertion order. An entry whose similarity cannot
    /// be computed scores `-inf` and sorts last instead of failing the
    /// search.
    fn search(&self, query: &Embedding, top_k: usize) -> Vec<SearchResult> {
        if top_k == 0 || self.entries.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, (document, embedding))| {
                let score = query.cosine_similarity(embedding).unwrap_or_else(|e| {
                    tracing::debug!(index, error = %e, "degenerate embedding ranked last");
                    f32::NEG_INFINITY
                });
                SearchResult {
                    document: document.clone(),
                    score,
                }
            })
            .collect();

        // Stable sort: ties stay in insertion order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        results.truncate(top_k);
        results
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
