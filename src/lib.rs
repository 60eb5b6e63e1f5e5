//! Retrieval-augmented post generation and publishing.
//!
//! ```text
//! corpus/*.json -> load_corpus -> embed (document) -> InMemoryVectorStore
//!                                                         |
//! trend context -> embed (query) -> cosine top-k <--------+
//!                                        |
//!                              compose_prompt -> Generator -> parse_response
//!                                                                  |
//!                                                         GeneratedPost -> X API
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
