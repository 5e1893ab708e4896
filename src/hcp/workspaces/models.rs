//! Workspace data models

use serde::Deserialize;

use crate::hcp::traits::TfeResource;

/// Query options for listing workspaces
#[derive(Default, Debug, Clone, Copy)]
pub struct WorkspaceQuery<'a> {
    /// Server-side wildcard name match (e.g. `baseline-*`)
    pub wildcard_name: Option<&'a str>,
}

impl<'a> WorkspaceQuery<'a> {
    /// Query matching workspace names against a wildcard pattern
    pub fn wildcard(pattern: &'a str) -> Self {
        Self {
            wildcard_name: Some(pattern),
        }
    }
}

/// Workspace data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Workspace {
    pub id: String,
    pub attributes: WorkspaceAttributes,
}

impl TfeResource for Workspace {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Workspace attributes from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct WorkspaceAttributes {
    pub name: String,
}

/// One page of a workspace listing
#[derive(Debug, Clone, Default)]
pub struct WorkspacePage {
    pub workspaces: Vec<Workspace>,
    /// Total page count reported by the server (0 when nothing matched)
    pub total_pages: u32,
}
