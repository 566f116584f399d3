//! Workflow endpoint clients.

mod http;

pub use http::{HttpWorkflowClient, WorkflowConfig};
