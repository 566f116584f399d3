//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod repository;
mod scheduler;
mod workflow;

pub use repository::PostStore;
pub use scheduler::PostScheduler;
pub use workflow::{DispatchPayload, WorkflowClient};
