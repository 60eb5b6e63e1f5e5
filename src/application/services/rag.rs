use std::sync::Arc;
use tracing::instrument;

use crate::application::CallPolicy;
use crate::domain::{
    ports::{Embedder, VectorStore},
    Document, DomainError, EmbeddingPurpose, SearchResult,
};

/// Similarity retrieval over a prebuilt embedding store.
pub struct RagService {
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    policy: CallPolicy,
    default_top_k: usize,
}

impl RagService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        policy: CallPolicy,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            policy,
            default_top_k,
        }
    }

    pub fn store_size(&self) -> usize {
        self.vector_store.len()
    }

    #[instrument(skip(self))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        self.retrieve_top_k(query, self.default_top_k).await
    }

    /// An empty store (or `top_k == 0`) returns nothing without embedding
    /// the query.
    #[instrument(skip(self))]
    pub async fn retrieve_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        if top_k == 0 || self.vector_store.is_empty() {
            return Ok(Vec::new());
        }

        let embedding = self
            .policy
            .run("embed query", || {
                self.embedder.embed(query, EmbeddingPurpose::Query)
            })
            .await?;

        let results = self.vector_store.search(&embedding, top_k);
        tracing::debug!(hits = results.len(), "retrieved examples");
        Ok(results)
    }

    pub async fn retrieve_documents(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<Document>, DomainError> {
        Ok(self
            .retrieve_top_k(query, top_k)
            .await?
            .into_iter()
            .map(|r| r.document)
            .collect())
    }
}
