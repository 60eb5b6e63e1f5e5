use std::sync::Arc;
use tracing::instrument;

use crate::application::{CallPolicy, RagService};
use crate::domain::{
    compose_prompt, parse_response, ports::Generator, DomainError, GeneratedPost,
};

/// Number of corpus examples placed in each prompt.
pub const DEFAULT_EXAMPLES: usize = 3;

/// Retrieval-augmented post generation: retrieve, compose, generate, parse.
pub struct PostGenerator {
    rag: Arc<RagService>,
    generator: Arc<dyn Generator>,
    policy: CallPolicy,
    examples: usize,
}

impl PostGenerator {
    pub fn new(rag: Arc<RagService>, generator: Arc<dyn Generator>, policy: CallPolicy) -> Self {
        Self {
            rag,
            generator,
            policy,
            examples: DEFAULT_EXAMPLES,
        }
    }

    pub fn with_examples(mut self, examples: usize) -> Self {
        self.examples = examples;
        self
    }

    /// Failures of the generation call surface as `DomainError::Generation`;
    /// retrieval failures propagate unchanged.
    #[instrument(skip(self))]
    pub async fn generate(&self, trend_context: &str) -> Result<GeneratedPost, DomainError> {
        let examples = self
            .rag
            .retrieve_documents(trend_context, self.examples)
            .await?;
        tracing::debug!(examples = examples.len(), "composing prompt");

        let prompt = compose_prompt(trend_context, &examples);

        let raw = self
            .policy
            .run("generate post", || self.generator.generate(&prompt))
            .await
            .map_err(|e| match e {
                DomainError::Generation(_) => e,
                other => DomainError::generation(other.to_string()),
            })?;

        let post = parse_response(&raw);
        if post.text.is_empty() {
            return Err(DomainError::generation("model returned an empty post"));
        }

        tracing::info!(chars = post.text.chars().count(), tags = ?post.tags, "post generated");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ports::Embedder, Document, Embedding, EmbeddingPurpose, NO_EXAMPLES};
    use crate::infrastructure::InMemoryVectorStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FirstCharEmbedder;

    #[async_trait]
    impl Embedder for FirstCharEmbedder {
        async fn embed(&self, text: &str, _: EmbeddingPurpose) -> Result<Embedding, DomainError> {
            let c = text.chars().next().unwrap_or('a') as u32 as f32;
            Ok(Embedding::new(vec![1.0, c - 96.0]))
        }
    }

    enum Reply {
        Text(&'static str),
        Fail,
        Hang,
    }

    struct ScriptedGenerator {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Generator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Fail => Err(DomainError::external("model unavailable")),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    async fn rag(texts: &[&str]) -> Arc<RagService> {
        let docs = texts
            .iter()
            .map(|t| Document::new(t, vec!["tag".into()]).unwrap())
            .collect();
        let store = InMemoryVectorStore::build(&FirstCharEmbedder, &CallPolicy::default(), docs)
            .await
            .unwrap();
        Arc::new(RagService::new(
            Arc::new(FirstCharEmbedder),
            Arc::new(store),
            CallPolicy::default(),
            DEFAULT_EXAMPLES,
        ))
    }

    #[tokio::test]
    async fn test_generate_parses_model_output() {
        let generator =
            ScriptedGenerator::new(Reply::Text("\"Automate one task today 🤖\nTags: ai, automation\""));
        let service = PostGenerator::new(rag(&[]).await, generator.clone(), CallPolicy::default());

        let post = service.generate("AI automation").await.unwrap();

        assert_eq!(post.text, "Automate one task today 🤖");
        assert_eq!(post.tags, vec!["ai", "automation"]);
    }

    #[tokio::test]
    async fn test_generate_without_corpus_says_no_examples() {
        let generator = ScriptedGenerator::new(Reply::Text("Body\nTags: a, b, c"));
        let service = PostGenerator::new(rag(&[]).await, generator.clone(), CallPolicy::default());

        service.generate("sales").await.unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(NO_EXAMPLES));
    }

    #[tokio::test]
    async fn test_generate_includes_top_three_examples() {
        let generator = ScriptedGenerator::new(Reply::Text("Body\nTags: a, b, c"));
        let rag = rag(&["alpha", "bravo", "charlie", "zulu", "yankee"]).await;
        let service = PostGenerator::new(rag, generator.clone(), CallPolicy::default());

        service.generate("about").await.unwrap();

        let prompt = generator.prompts.lock().unwrap()[0].clone();
        assert_eq!(prompt.matches("- Tweet:").count(), 3);
        assert!(prompt.contains("\"alpha\""));
        assert!(!prompt.contains("\"zulu\""));
    }

    #[tokio::test]
    async fn test_generate_failure_is_generation_error() {
        let generator = ScriptedGenerator::new(Reply::Fail);
        let service = PostGenerator::new(rag(&[]).await, generator, CallPolicy::default());

        let err = service.generate("anything").await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_empty_output_is_generation_error() {
        let generator = ScriptedGenerator::new(Reply::Text("  \"\"  "));
        let service = PostGenerator::new(rag(&[]).await, generator, CallPolicy::default());

        let err = service.generate("anything").await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_times_out() {
        let generator = ScriptedGenerator::new(Reply::Hang);
        let policy = CallPolicy::default().with_timeout(5);
        let service = PostGenerator::new(rag(&[]).await, generator, policy);

        let err = service.generate("anything").await.unwrap_err();
        assert!(matches!(err, DomainError::Generation(_)));
        assert!(err.to_string().contains("generate post"));
    }
}
