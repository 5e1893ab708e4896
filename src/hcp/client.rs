//! TFE HTTP client for API interactions

use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::{api, Config};
use crate::error::{Result, TfeError};
use crate::hcp::traits::PaginatedResponse;
use crate::hcp::Pagination;

/// One page of a paginated listing
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Pagination details, if the response carried any
    pub pagination: Option<Pagination>,
}

/// TFE API client
pub struct TfeClient {
    client: Client,
    token: String,
    /// API root, e.g. `https://app.terraform.io/api/v2`
    base_url: String,
    /// Retry 5xx responses with backoff
    retry_server_errors: bool,
}

impl TfeClient {
    /// Create a new TFE client from configuration
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            // Timeouts
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            token: config.token.clone(),
            base_url: format!(
                "{}/{}",
                config.address.trim_end_matches('/'),
                api::BASE_PATH.trim_start_matches('/')
            ),
            retry_server_errors: config.retry_server_errors,
        })
    }

    /// Create a client with custom base URL (for testing with mock servers)
    #[cfg(test)]
    pub fn with_base_url(token: String, base_url: String, retry_server_errors: bool) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url,
            retry_server_errors,
        }
    }

    /// Build the base URL for API requests
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/vnd.api+json")
    }

    /// Create a GET request builder with standard headers
    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    /// Create a POST request builder with standard headers
    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.post(url))
    }

    /// Send a request, retrying rate-limited and (optionally) failed attempts
    ///
    /// 429 is always retried. 5xx responses, connection failures and timeouts
    /// are retried only when retry of server errors is enabled. After
    /// `RETRY_MAX` retries the last outcome is returned as-is.
    pub(crate) async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let mut attempt: u32 = 0;

        loop {
            let Some(request) = builder.try_clone() else {
                // Streaming bodies cannot be replayed
                return Ok(builder.send().await?);
            };

            let outcome = request.send().await;
            let retryable = attempt < api::RETRY_MAX
                && match &outcome {
                    Ok(response) => self.should_retry(response.status()),
                    Err(err) => self.should_retry_transport(err),
                };

            if !retryable {
                return Ok(outcome?);
            }

            let reason = match &outcome {
                Ok(response) => response.status().as_u16().to_string(),
                Err(err) => err.to_string(),
            };
            let wait = retry_backoff(attempt);
            debug!(
                "Retrying after {} (attempt {}/{}), waiting {:?}",
                reason,
                attempt + 1,
                api::RETRY_MAX,
                wait
            );
            tokio::time::sleep(wait).await;
            attempt += 1;
        }
    }

    fn should_retry(&self, status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS
            || (self.retry_server_errors && status.is_server_error())
    }

    fn should_retry_transport(&self, err: &reqwest::Error) -> bool {
        self.retry_server_errors && (err.is_connect() || err.is_timeout())
    }

    /// Parse an API response, returning error for non-success status codes
    pub(crate) async fn parse_api_response<T>(
        &self,
        response: reqwest::Response,
        error_context: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TfeError::Api {
                status,
                message: format!("Failed to fetch {}: {}", error_context, body),
            });
        }
        decode_json(response, error_context).await
    }

    /// Fetch a single page from a paginated API endpoint
    ///
    /// # Arguments
    /// * `path` - API path (e.g., "/organizations/my-org/workspaces" or with query "...?search[name]=foo")
    /// * `page_number` - 1-based page to fetch
    /// * `error_context` - Context for error messages (e.g., "workspaces for organization 'my-org'")
    ///
    /// # Type Parameters
    /// * `T` - The item type (e.g., Workspace)
    /// * `R` - The response type that implements PaginatedResponse<T>
    pub async fn fetch_page<T, R>(
        &self,
        path: &str,
        page_number: u32,
        error_context: &str,
    ) -> Result<Page<T>>
    where
        R: DeserializeOwned + PaginatedResponse<T>,
    {
        let separator = if path.contains('?') { "&" } else { "?" };

        let url = format!(
            "{}{}{}page[size]={}&page[number]={}",
            self.base_url(),
            path,
            separator,
            api::DEFAULT_PAGE_SIZE,
            page_number
        );

        debug!("Fetching page {} from: {}", page_number, url);

        let response = self.send(self.get(&url)).await?;

        let page_context = format!("{} (page {})", error_context, page_number);
        let resp: R = self.parse_api_response(response, &page_context).await?;
        let pagination = resp.meta().and_then(|m| m.pagination.clone());
        let items = resp.into_data();

        debug!("Page {} returned {} items", page_number, items.len());
        Ok(Page { items, pagination })
    }
}

/// Decode a success body, reporting malformed JSON with its request context
pub(crate) async fn decode_json<T>(response: reqwest::Response, context: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| TfeError::json(context, e))
}

/// Exponential backoff bounded by the configured min/max wait
fn retry_backoff(attempt: u32) -> Duration {
    let factor = 1u64 << attempt.min(16);
    let millis = api::RETRY_WAIT_MIN_MS
        .saturating_mul(factor)
        .min(api::RETRY_WAIT_MAX_MS);
    Duration::from_millis(millis)
}

#[cfg(test)]
impl TfeClient {
    /// Create a test client with mock base URL and server-error retry disabled
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url("test-token".to_string(), base_url.to_string(), false)
    }

    /// Replace the HTTP client with one using a short request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder().timeout(timeout).build().unwrap();
        self
    }
}
