//! Release source backed by the GitHub releases API

#[cfg(test)]
use mockall::automock;

use tracing::{debug, warn};

use crate::config;
use crate::version::error::ReleaseError;
use crate::version::types::Release;

/// Number of releases requested per API page.
const PER_PAGE: usize = 100;

/// Trait for fetching the full list of published releases
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches every published release, newest first.
    ///
    /// Pagination is followed internally, one page at a time; the returned
    /// list is the concatenation of all pages in delivered order.
    async fn fetch_all(&self) -> Result<Vec<Release>, ReleaseError>;
}

/// Paginated release listing from the GitHub API
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    repo: String,
}

impl GitHubReleases {
    /// Creates a new source with a custom API base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("setup-earthbuild")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            repo: format!("{}/{}", config::REPO_OWNER, config::REPO_NAME),
        }
    }
}

impl Default for GitHubReleases {
    fn default() -> Self {
        Self::new(config::DEFAULT_API_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleases {
    async fn fetch_all(&self) -> Result<Vec<Release>, ReleaseError> {
        let mut releases = Vec::new();

        for page in 1.. {
            let url = format!(
                "{}/repos/{}/releases?per_page={}&page={}",
                self.base_url, self.repo, PER_PAGE, page
            );
            debug!("Fetching releases page {}: {}", page, url);

            let mut request = self
                .client
                .get(&url)
                .header("Accept", "application/vnd.github+json");

            if let Ok(token) =
                std::env::var("GITHUB_TOKEN").or_else(|_| std::env::var("GH_TOKEN"))
            {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            let response = request.send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                return Err(ReleaseError::RateLimited {
                    retry_after_secs: retry_after,
                });
            }

            if !status.is_success() {
                warn!("Releases API returned status {}: {}", status, url);
                return Err(ReleaseError::InvalidResponse(format!(
                    "Unexpected status: {}",
                    status
                )));
            }

            let page_releases: Vec<Release> = response.json().await.map_err(|e| {
                warn!("Failed to parse releases response: {}", e);
                ReleaseError::InvalidResponse(e.to_string())
            })?;

            let exhausted = page_releases.len() < PER_PAGE;
            releases.extend(page_releases);
            if exhausted {
                break;
            }
        }

        Ok(releases)
    }
}
