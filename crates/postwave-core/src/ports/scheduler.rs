use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Post;
use crate::error::ScheduleError;

/// Deferred dispatch of posts at their scheduled time.
#[async_trait]
pub trait PostScheduler: Send + Sync {
    /// Arm a single dispatch of `post` at `post.scheduled_time`.
    /// Registering an id that is already pending replaces the old registration.
    async fn register(&self, post: &Post) -> Result<(), ScheduleError>;

    /// Disarm the pending dispatch for `id`. Returns whether one existed.
    async fn cancel(&self, id: Uuid) -> bool;

    /// Ids of posts still waiting for dispatch, in registration order.
    async fn pending(&self) -> Vec<Uuid>;
}
