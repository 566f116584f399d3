//! Application state - shared across all handlers.

use std::sync::Arc;

use postwave_core::ports::PostStore;
use postwave_core::services::{Dispatcher, EngagementReconciler, PostLifecycle};
use postwave_infra::{CronPostScheduler, HttpWorkflowClient, InMemoryPostStore, WorkflowConfig};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<PostLifecycle>,
    pub reconciler: Arc<EngagementReconciler>,
    pub scheduler: Arc<CronPostScheduler>,
    pub workflow: WorkflowConfig,
}

impl AppState {
    /// Wire the store, workflow client, dispatcher and scheduler together.
    ///
    /// The scheduler is created stopped; call `scheduler.start()` before serving.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
        let client = Arc::new(HttpWorkflowClient::new(config.workflow.clone())?);

        let dispatcher = Arc::new(Dispatcher::new(store.clone(), client));
        let scheduler = Arc::new(CronPostScheduler::new(store.clone(), dispatcher.clone()).await?);
        let lifecycle = Arc::new(PostLifecycle::new(
            store.clone(),
            scheduler.clone(),
            dispatcher,
        ));
        let reconciler = Arc::new(EngagementReconciler::new(store));

        tracing::info!("Application state initialized");

        Ok(Self {
            lifecycle,
            reconciler,
            scheduler,
            workflow: config.workflow.clone(),
        })
    }
}
