//! HTTP client for the external automation workflow.

use std::time::Duration;

use async_trait::async_trait;

use postwave_core::error::DispatchError;
use postwave_core::ports::{DispatchPayload, WorkflowClient};

/// Workflow endpoint configuration.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Base URL of the workflow service (e.g., http://localhost:5678)
    pub base_url: String,
    /// Full webhook URL posts are sent to
    pub webhook_url: String,
    /// Bound on a single outbound call
    pub timeout: Duration,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::with_base_url("http://localhost:5678")
    }
}

impl WorkflowConfig {
    /// Configuration with the webhook path derived from `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            webhook_url: format!(
                "{}/webhook/social-media-post",
                base_url.trim_end_matches('/')
            ),
            base_url,
            timeout: Duration::from_secs(5),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("WORKFLOW_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5678".to_string());
        let defaults = Self::with_base_url(base_url);

        Self {
            webhook_url: std::env::var("WORKFLOW_WEBHOOK_URL").unwrap_or(defaults.webhook_url),
            timeout: Duration::from_secs(
                std::env::var("DISPATCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            base_url: defaults.base_url,
        }
    }
}

/// Posts dispatch payloads to the workflow webhook.
///
/// Makes exactly one request per call. The response body is returned as
/// JSON when it parses, otherwise as a JSON string.
pub struct HttpWorkflowClient {
    client: reqwest::Client,
    config: WorkflowConfig,
}

impl HttpWorkflowClient {
    pub fn new(config: WorkflowConfig) -> Result<Self, DispatchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        tracing::info!(
            url = %config.webhook_url,
            timeout_secs = config.timeout.as_secs(),
            "Workflow client configured"
        );

        Ok(Self { client, config })
    }
}

fn classify(err: reqwest::Error) -> DispatchError {
    if err.is_timeout() {
        DispatchError::Timeout
    } else if err.is_connect() {
        DispatchError::Connection(err.to_string())
    } else if let Some(status) = err.status() {
        DispatchError::Status(status.as_u16())
    } else {
        DispatchError::Transport(err.to_string())
    }
}

#[async_trait]
impl WorkflowClient for HttpWorkflowClient {
    async fn trigger(&self, payload: &DispatchPayload) -> Result<serde_json::Value, DispatchError> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|_| serde_json::Value::String(body)))
    }

    fn endpoint(&self) -> &str {
        &self.config.webhook_url
    }
}
