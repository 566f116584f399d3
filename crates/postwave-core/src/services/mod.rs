//! Services - the post lifecycle built on top of the ports.

mod dispatcher;
mod engagement;
mod lifecycle;

pub use dispatcher::{DispatchResult, Dispatched, Dispatcher};
pub use engagement::EngagementReconciler;
pub use lifecycle::{PostLifecycle, PostStats};

use uuid::Uuid;

use crate::error::{DomainError, RepoError};

/// Map a store failure for `id` onto the domain taxonomy.
pub(crate) fn repo_error(id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::post_not_found(id),
        other => DomainError::from(other),
    }
}
