use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding(pub Vec<f32>);

/// Why two vectors have no usable cosine similarity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegenerateVector {
    #[error("zero-norm vector")]
    ZeroNorm,

    #[error("dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    #[error("non-finite similarity")]
    NonFinite,
}

/// Which side of a retrieval an embedding is produced for. Providers
/// embed the two differently but into the same vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingPurpose {
    Document,
    Query,
}

impl Embedding {
    pub fn new(vec: Vec<f32>) -> Self {
        Self(vec)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }

    pub fn norm(&self) -> f32 {
        self.0.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// `dot(a, b) / (norm(a) * norm(b))`.
    pub fn cosine_similarity(&self, other: &Embedding) -> Result<f32, DegenerateVector> {
        if self.0.len() != other.0.len() {
            return Err(DegenerateVector::DimensionMismatch(
                self.0.len(),
                other.0.len(),
            ));
        }

        let norm_a = self.norm();
        let norm_b = other.norm();
        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(DegenerateVector::ZeroNorm);
        }

        let dot_product: f32 = self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum();
        let similarity = dot_product / (norm_a * norm_b);
        if !similarity.is_finite() {
            return Err(DegenerateVector::NonFinite);
        }

        Ok(similarity)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vec: Vec<f32>) -> Self {
        Self(vec)
    }
}

impl AsRef<[f32]> for Embedding {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

impl EmbeddingPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Query => "query",
        }
    }
}
