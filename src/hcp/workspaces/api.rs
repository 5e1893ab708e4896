//! Workspace API operations

use log::debug;

use crate::config::api;
use crate::error::Result;
use crate::hcp::traits::ApiListResponse;
use crate::hcp::TfeClient;

use super::models::{Workspace, WorkspacePage, WorkspaceQuery};

/// Build the API path for workspaces with optional query params
fn build_workspaces_path(org: &str, query: &WorkspaceQuery<'_>) -> String {
    let mut path = format!(
        "/{}/{}/{}",
        api::ORGANIZATIONS,
        urlencoding::encode(org),
        api::WORKSPACES
    );

    if let Some(pattern) = query.wildcard_name {
        path.push_str(&format!(
            "?search[wildcard-name]={}",
            urlencoding::encode(pattern)
        ));
    }

    path
}

impl TfeClient {
    /// Get one page of an organization's workspaces
    ///
    /// Uses `search[wildcard-name]` for server-side wildcard filtering. A
    /// response without pagination metadata is reported as a single page.
    pub async fn list_workspaces_page(
        &self,
        org: &str,
        query: &WorkspaceQuery<'_>,
        page_number: u32,
    ) -> Result<WorkspacePage> {
        let path = build_workspaces_path(org, query);

        let error_context = format!(
            "workspaces for organization '{}' (wildcard: {:?})",
            org, query.wildcard_name
        );

        let page = self
            .fetch_page::<Workspace, ApiListResponse<Workspace>>(
                &path,
                page_number,
                &error_context,
            )
            .await?;

        if let Some(p) = &page.pagination {
            debug!(
                "Workspace page {}/{}, {} match(es) in total",
                p.current_page, p.total_pages, p.total_count
            );
        }
        let total_pages = page.pagination.map(|p| p.total_pages).unwrap_or(1);

        Ok(WorkspacePage {
            workspaces: page.items,
            total_pages,
        })
    }
}
