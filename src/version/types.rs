//! Common types for release listings and resolution results

use semver::Version;
use serde::Deserialize;

/// A published release as returned by the releases API.
///
/// The API delivers releases newest-first; that order is preserved all the
/// way into resolution, where "latest" relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release tag, with or without a leading `v` (e.g. "v0.8.16").
    pub tag_name: String,

    /// Whether the release is marked as a prerelease.
    #[serde(default)]
    pub prerelease: bool,
}

impl Release {
    pub fn new(tag_name: impl Into<String>, prerelease: bool) -> Self {
        Self {
            tag_name: tag_name.into(),
            prerelease,
        }
    }
}

/// The single release picked by resolution.
///
/// The tag is kept exactly as published; `version` is the same tag parsed
/// with any leading `v` stripped, so the installer never has to re-parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    /// The matched release's tag, exactly as published.
    pub tag_name: String,

    /// The tag parsed as a semantic version.
    pub version: Version,
}

impl ResolvedVersion {
    /// Version string with any leading `v` stripped, used for cache keys.
    pub fn clean(&self) -> String {
        self.version.to_string()
    }
}
