//! Run API operations

use log::debug;

use crate::config::api;
use crate::error::{Result, TfeError};
use crate::hcp::client::decode_json;
use crate::hcp::TfeClient;

use super::models::{Run, RunCreateRequest, RunResponse};

impl TfeClient {
    /// Create a run on a workspace with default options
    ///
    /// Sends POST /runs with the workspace relationship only. Not idempotent:
    /// every call queues a new run.
    pub async fn create_run(&self, workspace_id: &str) -> Result<Run> {
        let url = format!("{}/{}", self.base_url(), api::RUNS);

        debug!("Creating run for workspace: {}", workspace_id);

        let body = RunCreateRequest::for_workspace(workspace_id);
        let response = self.send(self.post(&url).json(&body)).await?;

        match response.status().as_u16() {
            200 | 201 => {
                let context = format!("run created on workspace '{}'", workspace_id);
                let resp: RunResponse = decode_json(response, &context).await?;
                Ok(resp.data)
            }
            404 => Err(TfeError::Api {
                status: 404,
                message: format!(
                    "Workspace '{}' not found or not authorized to create runs",
                    workspace_id
                ),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(TfeError::Api {
                    status,
                    message: format!(
                        "Failed to create run for workspace '{}': {}",
                        workspace_id, body
                    ),
                })
            }
        }
    }
}
