use crate::domain::{Embedding, SearchResult};

/// Read side of an embedding store. Implementations are immutable once
/// built, so searches may run concurrently without locking.
pub trait VectorStore: Send + Sync {
    /// At most `top_k` results, most similar first.
    fn search(&self, query: &Embedding, top_k: usize) -> Vec<SearchResult>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
