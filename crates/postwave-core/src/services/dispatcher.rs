//! Outbound dispatch of a post to the workflow endpoint.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Post, PostStatus};
use crate::error::{DispatchError, RepoError};
use crate::ports::{DispatchPayload, PostStore, WorkflowClient};

/// Outcome of a dispatch attempt. Either way the post ends up published.
#[derive(Debug, Clone)]
pub enum DispatchResult {
    Delivered { response: serde_json::Value },
    Unreachable { cause: DispatchError },
}

impl DispatchResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchResult::Delivered { .. })
    }
}

/// A finished dispatch attempt: the outcome and the post as it now stands.
///
/// When the post was deleted while the call was in flight, `post` is the
/// dispatched snapshot marked published.
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub post: Post,
    pub result: DispatchResult,
}

/// Sends posts to the workflow endpoint and records the attempt on the store.
///
/// The endpoint is optional infrastructure: every attempt, successful or
/// not, marks the post published. There are no retries; the client's
/// timeout is the only bound on the call.
pub struct Dispatcher {
    store: Arc<dyn PostStore>,
    client: Arc<dyn WorkflowClient>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn PostStore>, client: Arc<dyn WorkflowClient>) -> Self {
        Self { store, client }
    }

    /// The URL posts are dispatched to.
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Attempt a single delivery of `post` and mark it published.
    pub async fn dispatch(&self, post: &Post) -> Dispatched {
        let payload = DispatchPayload::from(post);

        tracing::info!(
            post_id = %post.id,
            endpoint = %self.client.endpoint(),
            "Triggering workflow for post"
        );

        let result = match self.client.trigger(&payload).await {
            Ok(response) => {
                tracing::info!(post_id = %post.id, response = %response, "Workflow triggered");
                DispatchResult::Delivered { response }
            }
            Err(cause) => {
                tracing::warn!(
                    post_id = %post.id,
                    error = %cause,
                    "Workflow endpoint unavailable, publishing anyway"
                );
                DispatchResult::Unreachable { cause }
            }
        };

        let post = match self.store.update_status(post.id, PostStatus::Published).await {
            Ok(updated) => updated,
            Err(RepoError::NotFound) => {
                tracing::debug!(post_id = %post.id, "Post deleted while dispatch was in flight");
                published_snapshot(post)
            }
            Err(e) => {
                tracing::error!(post_id = %post.id, error = %e, "Failed to mark post published");
                published_snapshot(post)
            }
        };

        Dispatched { post, result }
    }
}

fn published_snapshot(post: &Post) -> Post {
    let mut snapshot = post.clone();
    snapshot.set_status(PostStatus::Published, Utc::now());
    snapshot
}
