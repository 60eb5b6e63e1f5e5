pub mod config;
pub mod corpus;
pub mod embedding;
pub mod llm;
pub mod social;
pub mod telemetry;
pub mod vector_store;

pub use config::{
    AppConfig, ConfigError, EmbeddingConfig, GeminiCredentials, LlmConfig, RagConfig,
    TwitterConfig, TwitterCredentials,
};
pub use corpus::{load_corpus, Corpus, ParseWarning};
pub use embedding::GeminiEmbedder;
pub use llm::GeminiLlm;
pub use social::TwitterClient;
pub use vector_store::InMemoryVectorStore;
