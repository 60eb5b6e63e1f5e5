mod embedding;
mod llm;
mod social;
mod vector_store;

pub use embedding::Embedder;
pub use llm::Generator;
pub use social::SocialPlatform;
pub use vector_store::VectorStore;
