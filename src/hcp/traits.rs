//! Common traits for TFE resources

use serde::Deserialize;

use crate::error::Result;
use crate::hcp::runs::Run;
use crate::hcp::workspaces::{WorkspacePage, WorkspaceQuery};
use crate::hcp::PaginationMeta;

/// Common trait for TFE resources identified by ID and name
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;
}

/// Trait for API responses that contain paginated data
///
/// Implement this trait for any `XResponse` struct to enable use with
/// `TfeClient::fetch_page()` helper.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Get reference to pagination metadata
    fn meta(&self) -> Option<&PaginationMeta>;
}

/// Generic API list response wrapper for paginated endpoints
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}

/// The remote operations run dispatching depends on
///
/// `TfeClient` is the production implementation; tests substitute a
/// recording fake.
#[allow(async_fn_in_trait)]
pub trait WorkspaceRunApi {
    /// List one page of an organization's workspaces matching `query`
    async fn list_workspaces_page(
        &self,
        org: &str,
        query: &WorkspaceQuery<'_>,
        page_number: u32,
    ) -> Result<WorkspacePage>;

    /// Queue a run with default options on the given workspace
    async fn create_run(&self, workspace_id: &str) -> Result<Run>;
}
