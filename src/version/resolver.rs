//! Specifier interpretation and release selection
//!
//! A specifier is one of:
//! - the literal `latest` (case-sensitive): newest eligible release
//! - an exact version, optionally `v`-prefixed: that version only
//! - a range (`0.8.*`, `^0.8`, `>=0.4, <0.5`): maximum satisfying version

use semver::{Version, VersionReq};
use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::semver::{parse_tag, strip_v_prefix};
use crate::version::source::ReleaseSource;
use crate::version::types::{Release, ResolvedVersion};

/// Resolves version specifiers against a release source.
pub struct VersionResolver<S> {
    source: S,
}

impl<S: ReleaseSource> VersionResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Resolve `specifier` to a single published release.
    ///
    /// `allow_prerelease` gates whether prerelease records are eligible.
    pub async fn resolve(
        &self,
        specifier: &str,
        allow_prerelease: bool,
    ) -> Result<ResolvedVersion, ResolveError> {
        let releases = self.source.fetch_all().await?;
        select(specifier, allow_prerelease, &releases)
    }
}

/// Pick one release from `releases` (newest first) for `specifier`.
pub fn select(
    specifier: &str,
    allow_prerelease: bool,
    releases: &[Release],
) -> Result<ResolvedVersion, ResolveError> {
    if releases.is_empty() {
        return Err(ResolveError::NoVersionsAvailable);
    }

    // A tag that does not parse as a semantic version can never be compared
    // or matched later, so it is dropped here.
    let mut candidates: Vec<(&Release, Version)> = releases
        .iter()
        .filter_map(|release| match parse_tag(&release.tag_name) {
            Some(version) => Some((release, version)),
            None => {
                debug!("Skipping release with non-semver tag: {}", release.tag_name);
                None
            }
        })
        .collect();

    if !allow_prerelease {
        candidates.retain(|(release, _)| !release.prerelease);
    }

    if specifier == "latest" {
        return candidates
            .first()
            .map(|(release, version)| resolved(release, version))
            .ok_or(ResolveError::NoVersionsAvailable);
    }

    let normalized = strip_v_prefix(specifier);

    // A fully-specified version is an exact requirement, not a range.
    if let Ok(wanted) = Version::parse(normalized) {
        return candidates
            .iter()
            .find(|(_, version)| *version == wanted)
            .map(|(release, version)| resolved(release, version))
            .ok_or_else(|| ResolveError::NoMatchingVersion(specifier.to_string()));
    }

    let range = VersionReq::parse(normalized)
        .map_err(|_| ResolveError::InvalidSpecifier(specifier.to_string()))?;

    candidates
        .iter()
        .filter(|(_, version)| range.matches(version))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(release, version)| resolved(release, version))
        .ok_or_else(|| ResolveError::NoMatchingVersion(specifier.to_string()))
}

fn resolved(release: &Release, version: &Version) -> ResolvedVersion {
    ResolvedVersion {
        tag_name: release.tag_name.clone(),
        version: version.clone(),
    }
}
