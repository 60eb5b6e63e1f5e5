pub mod entities;
pub mod errors;
pub mod ports;
pub mod prompt;

pub use entities::*;
pub use errors::DomainError;
pub use prompt::{compose_prompt, NO_EXAMPLES};
