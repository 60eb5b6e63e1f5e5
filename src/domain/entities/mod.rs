mod document;
mod embedding;
mod post;
mod tweet;

pub use document::{Document, SearchResult};
pub use embedding::{DegenerateVector, Embedding, EmbeddingPurpose};
pub use post::{parse_response, GeneratedPost, MAX_POST_CHARS, MAX_TAGS, TAGS_MARKER};
pub use tweet::{PublishedPost, Tweet, TweetPage};
