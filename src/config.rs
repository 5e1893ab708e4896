//! Configuration constants and environment-based settings

use log::debug;

use crate::error::{Result, TfeError};

/// Configuration constants for TFE API
pub mod api {
    /// Base path for TFE API v2
    pub const BASE_PATH: &str = "/api/v2";

    /// Organizations endpoint
    pub const ORGANIZATIONS: &str = "organizations";

    /// Workspaces endpoint
    pub const WORKSPACES: &str = "workspaces";

    /// Runs endpoint
    pub const RUNS: &str = "runs";

    /// Default page size for API requests
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    /// Maximum number of retries for retryable responses
    pub const RETRY_MAX: u32 = 30;

    /// Minimum wait between retries (milliseconds)
    pub const RETRY_WAIT_MIN_MS: u64 = 100;

    /// Maximum wait between retries (milliseconds)
    pub const RETRY_WAIT_MAX_MS: u64 = 400;
}

/// Environment variable names
pub mod env {
    /// API token (required)
    pub const TOKEN: &str = "TOKEN";

    /// Organization all commands operate on
    pub const ORGANIZATION: &str = "ORGANIZATION";

    /// API address, scheme included
    pub const ADDRESS: &str = "TFE_ADDRESS";

    /// Toggle for retrying 5xx responses
    pub const RETRY_SERVER_ERRORS: &str = "RETRY_SERVER_ERRORS";
}

/// Default values
pub mod defaults {
    /// Default organization
    pub const ORGANIZATION: &str = "cbh";

    /// Default TFE address
    pub const ADDRESS: &str = "https://app.terraform.io";

    /// Default log level
    pub const LOG_LEVEL: &str = "info";

    /// Server errors are retried unless disabled
    pub const RETRY_SERVER_ERRORS: bool = true;
}

/// Runtime configuration read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub organization: String,
    pub address: String,
    pub retry_server_errors: bool,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration using the given variable lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token = get(env::TOKEN).ok_or_else(|| {
            TfeError::Config(format!(
                "{} environment variable is not set. Export an HCP Terraform API token:\n\
                 \n\
                 export {}=<TOKEN>",
                env::TOKEN,
                env::TOKEN
            ))
        })?;

        let organization = get(env::ORGANIZATION).unwrap_or_else(|| {
            debug!(
                "{} not set, using default organization '{}'",
                env::ORGANIZATION,
                defaults::ORGANIZATION
            );
            defaults::ORGANIZATION.to_string()
        });

        let address = get(env::ADDRESS)
            .map(|a| a.trim_end_matches('/').to_string())
            .unwrap_or_else(|| defaults::ADDRESS.to_string());

        if !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(TfeError::Config(format!(
                "{} must include a scheme (http:// or https://), got '{}'",
                env::ADDRESS,
                address
            )));
        }

        let retry_server_errors = match get(env::RETRY_SERVER_ERRORS) {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                TfeError::Config(format!(
                    "{} must be a boolean (true/false), got '{}'",
                    env::RETRY_SERVER_ERRORS,
                    value
                ))
            })?,
            None => defaults::RETRY_SERVER_ERRORS,
        };

        Ok(Self {
            token,
            organization,
            address,
            retry_server_errors,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
