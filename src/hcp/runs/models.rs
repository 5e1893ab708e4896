//! Run data models

use serde::{Deserialize, Serialize};

/// Run data from TFE API
#[derive(Deserialize, Debug, Clone)]
pub struct Run {
    pub id: String,
    #[serde(default)]
    pub attributes: RunAttributes,
}

impl Run {
    /// Get status, defaulting to "unknown" if not available
    pub fn status(&self) -> &str {
        self.attributes.status.as_deref().unwrap_or("unknown")
    }
}

/// Run attributes from TFE API
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunAttributes {
    pub status: Option<String>,
}

/// Response wrapper for a single run
#[derive(Deserialize, Debug)]
pub struct RunResponse {
    pub data: Run,
}

/// JSON:API request body for `POST /runs`
///
/// Only the workspace relationship is set; every run option is left to
/// the workspace defaults.
#[derive(Serialize, Debug)]
pub struct RunCreateRequest<'a> {
    data: RunCreateData<'a>,
}

#[derive(Serialize, Debug)]
struct RunCreateData<'a> {
    #[serde(rename = "type")]
    resource_type: &'static str,
    relationships: RunCreateRelationships<'a>,
}

#[derive(Serialize, Debug)]
struct RunCreateRelationships<'a> {
    workspace: RelationshipRef<'a>,
}

#[derive(Serialize, Debug)]
struct RelationshipRef<'a> {
    data: ResourceIdentifier<'a>,
}

#[derive(Serialize, Debug)]
struct ResourceIdentifier<'a> {
    #[serde(rename = "type")]
    resource_type: &'static str,
    id: &'a str,
}

impl<'a> RunCreateRequest<'a> {
    /// Build a run-creation body for the given workspace
    pub fn for_workspace(workspace_id: &'a str) -> Self {
        Self {
            data: RunCreateData {
                resource_type: "runs",
                relationships: RunCreateRelationships {
                    workspace: RelationshipRef {
                        data: ResourceIdentifier {
                            resource_type: "workspaces",
                            id: workspace_id,
                        },
                    },
                },
            },
        }
    }
}
