use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{ports::Embedder, DomainError, Embedding, EmbeddingPurpose};
use crate::infrastructure::config::{EmbeddingConfig, GeminiCredentials};

/// Gemini `embedContent` over REST, one text per call.
pub struct GeminiEmbedder {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'static str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Values,
}

#[derive(Deserialize)]
struct Values {
    values: Vec<f32>,
}

fn task_type(purpose: EmbeddingPurpose) -> &'static str {
    match purpose {
        EmbeddingPurpose::Document => "RETRIEVAL_DOCUMENT",
        EmbeddingPurpose::Query => "RETRIEVAL_QUERY",
    }
}

impl GeminiEmbedder {
    pub fn new(
        config: &EmbeddingConfig,
        credentials: &GeminiCredentials,
    ) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(config.policy.timeout())
            .build()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.trim_start_matches("models/").to_string(),
            api_key: credentials.api_key.clone(),
        })
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str, purpose: EmbeddingPurpose) -> Result<Embedding, DomainError> {
        let url = format!("{}/models/{}:embedContent", self.base_url, self.model);
        let body = EmbedRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: [Part { text }],
            },
            task_type: task_type(purpose),
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::external(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DomainError::external(format!(
                "embedding request returned {status}: {detail}"
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| DomainError::external(format!("invalid embedding response: {e}")))?;

        if parsed.embedding.values.is_empty() {
            return Err(DomainError::external("empty embedding returned"));
        }

        tracing::trace!(
            purpose = purpose.as_str(),
            dims = parsed.embedding.values.len(),
            "embedded"
        );
        Ok(Embedding::new(parsed.embedding.values))
    }
}
