//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! adapters, and run every external call under a [`CallPolicy`].

pub mod policy;
pub mod services;

pub use policy::CallPolicy;
pub use services::{
    PostGenerator, PublishOutcome, PublishService, RagService, TimelineService,
};
