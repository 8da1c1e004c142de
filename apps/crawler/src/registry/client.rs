use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use super::types::{NodeGroups, ValueUpdate};

/// Deadline for any single registry request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Transport-level failure: connection, timeout, or an undecodable body.
    #[error("registry request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The registry answered a submission outside the accepted status range.
    #[error("submission rejected with status {status}")]
    Rejected { status: StatusCode },
}

/// Registry operations used by the crawler.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch the full node-group snapshot.
    async fn node_groups(&self) -> Result<NodeGroups, RegistryError>;

    /// Store a measured attribute value for one node.
    async fn update_attribute(
        &self,
        group: &str,
        node: &str,
        attribute: &str,
        value: u64,
    ) -> Result<(), RegistryError>;
}

/// HTTP client for the balancer registry API.
pub struct RegistryClient {
    http: reqwest::Client,
    base: String,
}

impl RegistryClient {
    /// Build a client for the registry at `base_url`.
    pub fn new(base_url: Url) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base = base_url.as_str().trim_end_matches('/').to_string();

        Ok(Self { http, base })
    }
}

#[async_trait]
impl Registry for RegistryClient {
    async fn node_groups(&self) -> Result<NodeGroups, RegistryError> {
        let url = format!("{}/node_group", self.base);
        let groups = self.http.get(&url).send().await?.error_for_status()?.json().await?;

        Ok(groups)
    }

    async fn update_attribute(
        &self,
        group: &str,
        node: &str,
        attribute: &str,
        value: u64,
    ) -> Result<(), RegistryError> {
        let url = format!(
            "{}/node_group/{}/node/{}/attribute/{}",
            self.base, group, node, attribute
        );
        let response = self.http.put(&url).json(&ValueUpdate { value }).send().await?;

        let status = response.status();
        if is_submission_success(status) {
            Ok(())
        } else {
            Err(RegistryError::Rejected { status })
        }
    }
}

/// The registry acknowledges a stored update with any status in `[200, 399]`.
fn is_submission_success(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}
