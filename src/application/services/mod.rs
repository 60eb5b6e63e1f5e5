mod generation;
mod rag;
mod social;

pub use generation::{PostGenerator, DEFAULT_EXAMPLES};
pub use rag::RagService;
pub use social::{PublishOutcome, PublishService, TimelineService, PAGE_SIZE};
