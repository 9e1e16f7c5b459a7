//! Shared semver utilities for tags and specifiers

use semver::Version;

/// Strip a single leading `v` from a tag or specifier.
///
/// Stripping is idempotent: tags carry at most one `v` prefix.
pub fn strip_v_prefix(s: &str) -> &str {
    s.strip_prefix('v').unwrap_or(s)
}

/// Parse a release tag into a semantic version, tolerating a leading `v`.
pub fn parse_tag(tag: &str) -> Option<Version> {
    Version::parse(strip_v_prefix(tag)).ok()
}

/// Strict validity predicate used by the exact-version fast path.
///
/// Only a bare, fully-specified version qualifies: `0.8.17` and
/// `0.8.17-rc-1` are valid, while `0.8.*` and `v0.8.17` are not and must go
/// through range resolution instead.
pub fn is_strict_version(s: &str) -> bool {
    Version::parse(s).is_ok()
}
