//! Post scheduler using tokio-cron-scheduler one-shot jobs.
//!
//! Each scheduled post gets exactly one job armed for its absolute
//! scheduled time. The pending registry maps post ids to their job so that
//! deletion disarms the timer explicitly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use uuid::Uuid;

use postwave_core::domain::Post;
use postwave_core::error::ScheduleError;
use postwave_core::ports::{PostScheduler, PostStore};
use postwave_core::services::Dispatcher;

struct PendingEntry {
    post_id: Uuid,
    job_id: Uuid,
    fire_at: DateTime<Utc>,
}

type Registry = Arc<Mutex<Vec<PendingEntry>>>;

fn backend(err: JobSchedulerError) -> ScheduleError {
    ScheduleError::Backend(format!("{:?}", err))
}

/// Timer-backed scheduler that dispatches each registered post once.
pub struct CronPostScheduler {
    inner: JobScheduler,
    pending: Registry,
    store: Arc<dyn PostStore>,
    dispatcher: Arc<Dispatcher>,
}

impl CronPostScheduler {
    /// Create a new scheduler. Jobs only fire after [`start`](Self::start).
    pub async fn new(
        store: Arc<dyn PostStore>,
        dispatcher: Arc<Dispatcher>,
    ) -> Result<Self, ScheduleError> {
        let inner = JobScheduler::new().await.map_err(backend)?;
        Ok(Self {
            inner,
            pending: Arc::new(Mutex::new(Vec::new())),
            store,
            dispatcher,
        })
    }

    /// Start the scheduler.
    pub async fn start(&self) -> Result<(), ScheduleError> {
        self.inner.start().await.map_err(backend)?;
        tracing::info!("Scheduler started");
        Ok(())
    }

    /// Stop the scheduler. Pending posts are dropped.
    pub async fn shutdown(&self) -> Result<(), ScheduleError> {
        let mut inner = self.inner.clone();
        inner.shutdown().await.map_err(backend)?;

        let dropped = self.pending.lock().await.len();
        tracing::info!(dropped, "Scheduler stopped");
        Ok(())
    }
}

/// Runs when a post's job fires.
async fn fire(
    post_id: Uuid,
    job_id: Uuid,
    pending: Registry,
    store: Arc<dyn PostStore>,
    dispatcher: Arc<Dispatcher>,
) {
    let armed = pending
        .lock()
        .await
        .iter()
        .any(|entry| entry.post_id == post_id && entry.job_id == job_id);
    if !armed {
        tracing::debug!(post_id = %post_id, job_id = %job_id, "Job no longer pending, skipping");
        return;
    }

    match store.get(post_id).await {
        Ok(Some(post)) => {
            tracing::info!(post_id = %post_id, "Executing scheduled post");
            let dispatched = dispatcher.dispatch(&post).await;
            tracing::info!(
                post_id = %post_id,
                delivered = dispatched.result.is_delivered(),
                "Scheduled post published"
            );
        }
        Ok(None) => {
            tracing::debug!(post_id = %post_id, "Scheduled post no longer exists");
        }
        Err(e) => {
            tracing::error!(post_id = %post_id, error = %e, "Failed to load scheduled post");
        }
    }

    pending.lock().await.retain(|entry| entry.job_id != job_id);
}

#[async_trait]
impl PostScheduler for CronPostScheduler {
    async fn register(&self, post: &Post) -> Result<(), ScheduleError> {
        let post_id = post.id;
        let fire_at = post.scheduled_time;
        let delay = (fire_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);

        let pending = self.pending.clone();
        let store = self.store.clone();
        let dispatcher = self.dispatcher.clone();

        let job = Job::new_one_shot_async(delay, move |job_id, _lock| {
            let pending = pending.clone();
            let store = store.clone();
            let dispatcher = dispatcher.clone();
            Box::pin(async move {
                fire(post_id, job_id, pending, store, dispatcher).await;
            })
        })
        .map_err(backend)?;

        // Held across the add so a zero-delay job cannot fire before it is registered.
        let mut pending = self.pending.lock().await;

        if let Some(index) = pending.iter().position(|entry| entry.post_id == post_id) {
            let replaced = pending.remove(index);
            if let Err(e) = self.inner.remove(&replaced.job_id).await {
                tracing::warn!(post_id = %post_id, error = ?e, "Failed to remove replaced job");
            }
            tracing::debug!(post_id = %post_id, job_id = %replaced.job_id, "Replaced pending job");
        }

        let job_id = self.inner.add(job).await.map_err(backend)?;
        pending.push(PendingEntry {
            post_id,
            job_id,
            fire_at,
        });

        tracing::info!(
            post_id = %post_id,
            job_id = %job_id,
            fire_at = %fire_at,
            delay_secs = delay.as_secs(),
            "One-shot dispatch armed"
        );
        Ok(())
    }

    async fn cancel(&self, id: Uuid) -> bool {
        let entry = {
            let mut pending = self.pending.lock().await;
            match pending.iter().position(|entry| entry.post_id == id) {
                Some(index) => pending.remove(index),
                None => return false,
            }
        };

        if let Err(e) = self.inner.remove(&entry.job_id).await {
            // The registry entry is already gone, so a late firing is skipped.
            tracing::warn!(post_id = %id, error = ?e, "Failed to remove job from timer");
        }

        tracing::info!(
            post_id = %id,
            job_id = %entry.job_id,
            fire_at = %entry.fire_at,
            "Pending dispatch cancelled"
        );
        true
    }

    async fn pending(&self) -> Vec<Uuid> {
        self.pending
            .lock()
            .await
            .iter()
            .map(|entry| entry.post_id)
            .collect()
    }
}
