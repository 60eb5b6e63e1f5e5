use crate::domain::{errors::DomainError, Embedding, EmbeddingPurpose};
use async_trait::async_trait;

/// Maps text to a vector. Document and query embeddings must land in the
/// same space.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str, purpose: EmbeddingPurpose) -> Result<Embedding, DomainError>;
}
