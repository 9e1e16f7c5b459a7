use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No versions available")]
    NoVersionsAvailable,

    #[error("Invalid version specifier: {0}")]
    InvalidSpecifier(String),

    #[error("No version matching {0}")]
    NoMatchingVersion(String),

    #[error(transparent)]
    Release(#[from] ReleaseError),
}
