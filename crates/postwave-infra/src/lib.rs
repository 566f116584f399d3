//! # Postwave Infrastructure
//!
//! Concrete implementations of the ports defined in `postwave-core`:
//! the in-memory post store, the HTTP workflow client and the timer-backed
//! post scheduler.

pub mod scheduling;
pub mod store;
pub mod workflow;

pub use scheduling::CronPostScheduler;
pub use store::InMemoryPostStore;
pub use workflow::{HttpWorkflowClient, WorkflowConfig};
