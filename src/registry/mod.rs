//! Access to the package registries.
//!
//! - [`index`]: parsed `PACKAGES` indices for CRAN and the three Bioconductor sub-indices.
//! - [`github`]: reading the GitHub releases listing.
//!
//! All network traffic goes through [`RemoteSource`] so resolution can run against an
//! in-memory source in tests. [`HttpSource`] is the production implementation.

pub mod github;
pub mod index;

use std::time::Duration;

use reqwest::Client;

use crate::error::TransportError;

const USER_AGENT: &str = concat!("rpkgbuild/", env!("CARGO_PKG_VERSION"));

/// Network collaborator used by index loading and descriptor resolution.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Fetch a text document such as a `PACKAGES` index.
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError>;

    /// Fetch a binary artifact such as a source tarball.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// Name of the latest GitHub release of `owner/repo`, or `None` if there is none.
    async fn latest_release(&self, owner: &str, repo: &str)
        -> Result<Option<String>, TransportError>;
}

/// [`RemoteSource`] over HTTP.
pub struct HttpSource {
    client: Client,
    github_api: String,
}

impl HttpSource {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(HttpSource {
            client,
            github_api: "https://api.github.com".to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, TransportError> {
        tracing::debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }
        Ok(response)
    }
}

impl RemoteSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }

    async fn latest_release(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<String>, TransportError> {
        let url = github::releases_url(&self.github_api, owner, repo);
        match self.get(&url).await {
            Ok(response) => {
                let body = response.text().await?;
                Ok(github::latest_release_name(&body))
            }
            Err(TransportError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
