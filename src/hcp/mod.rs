//! TFE API client module
//!
//! This module provides functionality to interact with Terraform Enterprise API.

mod client;
pub mod dispatch;
pub mod runs;
pub mod traits;
pub mod workspaces;

use serde::Deserialize;

pub use client::{Page, TfeClient};
pub use dispatch::{dispatch_runs, run_dispatch_command, DispatchSummary};
pub use runs::{Run, RunAttributes};
pub use traits::{ApiListResponse, PaginatedResponse, TfeResource, WorkspaceRunApi};
pub use workspaces::{Workspace, WorkspaceAttributes, WorkspacePage, WorkspaceQuery};

/// Pagination metadata from TFE API (shared across resources)
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PaginationMeta {
    pub pagination: Option<Pagination>,
}

/// Pagination details
#[derive(Deserialize, Debug, Clone)]
pub struct Pagination {
    #[serde(rename = "current-page")]
    pub current_page: u32,
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
    #[serde(rename = "total-count", default)]
    pub total_count: u32,
}
