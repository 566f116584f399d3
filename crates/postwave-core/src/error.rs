//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Scheduling failed: {0}")]
    Scheduling(#[from] ScheduleError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Entity not found")]
    NotFound,

    #[error("Storage backend failed: {0}")]
    Backend(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Failures of the outbound call to the workflow endpoint.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("Workflow endpoint timed out")]
    Timeout,

    #[error("Workflow endpoint unreachable: {0}")]
    Connection(String),

    #[error("Workflow endpoint responded with status {0}")]
    Status(u16),

    #[error("Workflow request failed: {0}")]
    Transport(String),
}

/// Timer backend errors.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Timer backend error: {0}")]
    Backend(String),
}
