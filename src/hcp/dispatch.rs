//! Run dispatching across pattern-matched workspaces
//!
//! Pages are walked strictly in order and every matched workspace gets
//! exactly one run before the next page is requested. The first failure,
//! listing or run creation, ends the dispatch.

use log::{debug, info};

use crate::config::Config;
use crate::error::{Result, TfeError};
use crate::hcp::runs::Run;
use crate::hcp::traits::{TfeResource, WorkspaceRunApi};
use crate::hcp::workspaces::{WorkspacePage, WorkspaceQuery};
use crate::hcp::TfeClient;

/// Counts reported after a successful dispatch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub pages_fetched: u32,
    pub runs_created: u32,
}

impl WorkspaceRunApi for TfeClient {
    async fn list_workspaces_page(
        &self,
        org: &str,
        query: &WorkspaceQuery<'_>,
        page_number: u32,
    ) -> Result<WorkspacePage> {
        TfeClient::list_workspaces_page(self, org, query, page_number).await
    }

    async fn create_run(&self, workspace_id: &str) -> Result<Run> {
        TfeClient::create_run(self, workspace_id).await
    }
}

/// Create one run for every workspace in `org` whose name matches `pattern`
///
/// Returns on the first error without touching any later workspace or page.
pub async fn dispatch_runs<A>(api: &A, org: &str, pattern: &str) -> Result<DispatchSummary>
where
    A: WorkspaceRunApi,
{
    if pattern.is_empty() {
        return Err(TfeError::Config("Workspace pattern must not be empty".to_string()));
    }

    let query = WorkspaceQuery::wildcard(pattern);
    let mut summary = DispatchSummary::default();
    let mut page_number: u32 = 1;

    loop {
        let page = api.list_workspaces_page(org, &query, page_number).await?;
        summary.pages_fetched += 1;

        debug!(
            "Page {}/{} for '{}': {} workspace(s)",
            page_number,
            page.total_pages,
            pattern,
            page.workspaces.len()
        );

        for workspace in &page.workspaces {
            info!("Workspace: {}", workspace.name());
            let run = api.create_run(workspace.id()).await?;
            debug!(
                "Created run {} ({}) for workspace {}",
                run.id,
                run.status(),
                workspace.id()
            );
            summary.runs_created += 1;
        }

        if page_number >= page.total_pages {
            break;
        }
        page_number += 1;
    }

    Ok(summary)
}

/// Run the dispatch for a resolved pattern in the configured organization
pub async fn run_dispatch_command(
    client: &TfeClient,
    config: &Config,
    pattern: &str,
) -> Result<DispatchSummary> {
    info!(
        "Dispatching runs in organization '{}' for workspaces matching '{}'",
        config.organization, pattern
    );

    let summary = dispatch_runs(client, &config.organization, pattern).await?;

    info!(
        "Created {} run(s) across {} page(s)",
        summary.runs_created, summary.pages_fetched
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::hcp::runs::RunAttributes;
    use crate::hcp::workspaces::{Workspace, WorkspaceAttributes};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        List { page: u32, pattern: String },
        Create(String),
    }

    /// Fake API serving canned pages and recording every call
    struct RecordingApi {
        pages: Vec<Vec<(&'static str, &'static str)>>,
        /// Total reported with each page; the last entry repeats
        totals: Vec<u32>,
        fail_list_on_page: Option<u32>,
        fail_create_for: Option<&'static str>,
        calls: RefCell<Vec<Call>>,
    }

    impl RecordingApi {
        fn new(pages: Vec<Vec<(&'static str, &'static str)>>) -> Self {
            let totals = vec![pages.len() as u32; pages.len().max(1)];
            Self {
                pages,
                totals,
                fail_list_on_page: None,
                fail_create_for: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn listed_pages(&self) -> Vec<u32> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::List { page, .. } => Some(page),
                    Call::Create(_) => None,
                })
                .collect()
        }

        fn created(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Create(id) => Some(id),
                    Call::List { .. } => None,
                })
                .collect()
        }
    }

    impl WorkspaceRunApi for RecordingApi {
        async fn list_workspaces_page(
            &self,
            _org: &str,
            query: &WorkspaceQuery<'_>,
            page_number: u32,
        ) -> Result<WorkspacePage> {
            self.calls.borrow_mut().push(Call::List {
                page: page_number,
                pattern: query.wildcard_name.unwrap_or_default().to_string(),
            });

            if self.fail_list_on_page == Some(page_number) {
                return Err(TfeError::Api {
                    status: 500,
                    message: format!("page {} unavailable", page_number),
                });
            }

            let workspaces = self
                .pages
                .get(page_number as usize - 1)
                .cloned()
                .unwrap_or_default()
                .into_iter()
                .map(|(id, name)| Workspace {
                    id: id.to_string(),
                    attributes: WorkspaceAttributes {
                        name: name.to_string(),
                    },
                })
                .collect();

            let index = page_number as usize - 1;
            let total_pages = self
                .totals
                .get(index)
                .or(self.totals.last())
                .copied()
                .unwrap_or_default();

            Ok(WorkspacePage {
                workspaces,
                total_pages,
            })
        }

        async fn create_run(&self, workspace_id: &str) -> Result<Run> {
            self.calls
                .borrow_mut()
                .push(Call::Create(workspace_id.to_string()));

            if self.fail_create_for == Some(workspace_id) {
                return Err(TfeError::Api {
                    status: 409,
                    message: format!("workspace '{}' is locked", workspace_id),
                });
            }

            Ok(Run {
                id: format!("run-{}", workspace_id),
                attributes: RunAttributes::default(),
            })
        }
    }

    fn three_pages() -> RecordingApi {
        RecordingApi::new(vec![
            vec![("ws-1", "baseline-a"), ("ws-2", "baseline-b")],
            vec![("ws-3", "baseline-c")],
            vec![("ws-4", "baseline-d"), ("ws-5", "baseline-e")],
        ])
    }

    #[tokio::test]
    async fn test_every_page_requested_once_in_order() {
        let api = three_pages();

        let summary = dispatch_runs(&api, "cbh", "baseline-*").await.unwrap();

        assert_eq!(api.listed_pages(), vec![1, 2, 3]);
        assert_eq!(summary.pages_fetched, 3);
    }

    #[tokio::test]
    async fn test_one_run_per_listed_workspace() {
        let api = three_pages();

        let summary = dispatch_runs(&api, "cbh", "baseline-*").await.unwrap();

        assert_eq!(api.created(), vec!["ws-1", "ws-2", "ws-3", "ws-4", "ws-5"]);
        assert_eq!(summary.runs_created, 5);
    }

    #[tokio::test]
    async fn test_runs_created_before_next_page() {
        let api = RecordingApi::new(vec![
            vec![("ws-1", "baseline-a")],
            vec![("ws-2", "baseline-b")],
        ]);

        dispatch_runs(&api, "cbh", "baseline-*").await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                Call::List {
                    page: 1,
                    pattern: "baseline-*".to_string()
                },
                Call::Create("ws-1".to_string()),
                Call::List {
                    page: 2,
                    pattern: "baseline-*".to_string()
                },
                Call::Create("ws-2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_listing_failure_stops_dispatch() {
        let mut api = three_pages();
        api.fail_list_on_page = Some(2);

        let result = dispatch_runs(&api, "cbh", "baseline-*").await;

        assert!(result.is_err());
        assert_eq!(api.listed_pages(), vec![1, 2]);
        assert_eq!(api.created(), vec!["ws-1", "ws-2"]);
    }

    #[tokio::test]
    async fn test_listing_failure_on_first_page_creates_nothing() {
        let mut api = three_pages();
        api.fail_list_on_page = Some(1);

        let result = dispatch_runs(&api, "cbh", "baseline-*").await;

        assert!(result.is_err());
        assert_eq!(api.listed_pages(), vec![1]);
        assert!(api.created().is_empty());
    }

    #[tokio::test]
    async fn test_run_creation_failure_stops_dispatch() {
        let mut api = three_pages();
        api.fail_create_for = Some("ws-2");

        let result = dispatch_runs(&api, "cbh", "baseline-*").await;

        match result.unwrap_err() {
            TfeError::Api { status, .. } => assert_eq!(status, 409),
            _ => panic!("Expected TfeError::Api"),
        }
        assert_eq!(api.created(), vec!["ws-1", "ws-2"]);
        assert_eq!(api.listed_pages(), vec![1]);
    }

    #[tokio::test]
    async fn test_no_matches_requests_single_page() {
        let mut api = RecordingApi::new(vec![vec![]]);
        api.totals = vec![0];

        let summary = dispatch_runs(&api, "cbh", "nothing-*").await.unwrap();

        assert_eq!(api.listed_pages(), vec![1]);
        assert_eq!(
            summary,
            DispatchSummary {
                pages_fetched: 1,
                runs_created: 0
            }
        );
    }

    #[tokio::test]
    async fn test_page_total_growing_during_walk() {
        let mut api = three_pages();
        api.totals = vec![2, 3, 3];

        let summary = dispatch_runs(&api, "cbh", "baseline-*").await.unwrap();

        assert_eq!(api.listed_pages(), vec![1, 2, 3]);
        assert_eq!(summary.runs_created, 5);
    }

    #[tokio::test]
    async fn test_page_total_shrinking_during_walk() {
        let mut api = three_pages();
        api.totals = vec![3, 2];

        let summary = dispatch_runs(&api, "cbh", "baseline-*").await.unwrap();

        assert_eq!(api.listed_pages(), vec![1, 2]);
        assert_eq!(api.created(), vec!["ws-1", "ws-2", "ws-3"]);
        assert_eq!(summary.pages_fetched, 2);
    }

    #[tokio::test]
    async fn test_empty_pattern_rejected_without_calls() {
        let api = three_pages();

        let result = dispatch_runs(&api, "cbh", "").await;

        assert!(matches!(result, Err(TfeError::Config(_))));
        assert!(api.calls().is_empty());
    }
}
