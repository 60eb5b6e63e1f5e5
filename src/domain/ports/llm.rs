use crate::domain::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
