use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;

use crate::domain::{ports::Generator, DomainError};
use crate::infrastructure::config::{GeminiCredentials, LlmConfig};

/// Single-turn text generation through Gemini.
pub struct GeminiLlm {
    client: gemini::Client,
    model: String,
}

impl GeminiLlm {
    pub fn new(config: &LlmConfig, credentials: &GeminiCredentials) -> Result<Self, DomainError> {
        let client = gemini::Client::new(credentials.api_key.as_str())
            .map_err(|e| DomainError::internal(format!("Gemini client setup failed: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Generator for GeminiLlm {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let agent = self.client.agent(&self.model).build();
        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::external(format!("Gemini generation failed: {e}")))
    }
}
