//! Progress reporting for long-running workflows

use async_trait::async_trait;

/// Receives status updates while a workflow runs
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Informational status line
    async fn on_message(&self, message: &str);

    /// Something the operator should look at; the workflow continues
    async fn on_warning(&self, message: &str);
}

/// Progress callback that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}

    async fn on_warning(&self, _message: &str) {}
}
