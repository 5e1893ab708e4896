//! tfc-dispatch - Trigger HCP Terraform runs on groups of workspaces
//!
//! Selects workspaces in an organization by a server-side wildcard name
//! match and queues one run (default options) on each of them.
//!
//! # Configuration
//!
//! - `TOKEN` (required) - API token
//! - `ORGANIZATION` - organization to operate on (default `cbh`)
//! - `TFE_ADDRESS` - API address (default `https://app.terraform.io`)
//! - `RETRY_SERVER_ERRORS` - retry 5xx responses (default `true`)
//!
//! # Example
//!
//! ```bash
//! # Run every workspace named baseline-*
//! tfc-dispatch baseline
//!
//! # Run every workspace named wl-inception-*
//! tfc-dispatch inception
//!
//! # Run every workspace whose name starts with "team-a-"
//! tfc-dispatch custom --filter team-a-
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod hcp;

pub use cli::{Cli, Invocation, PatternSource, RunTarget, RUN_TARGETS};
pub use config::Config;
pub use error::{Result, TfeError};
pub use hcp::{
    dispatch_runs, run_dispatch_command, DispatchSummary, Run, TfeClient, TfeResource,
    Workspace, WorkspacePage, WorkspaceQuery, WorkspaceRunApi,
};
