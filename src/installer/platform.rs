//! Host platform identification
//!
//! Translates the host operating system and CPU architecture into the
//! vocabulary used in release asset names. The two tables have different
//! fallback rules: unknown architectures pass through unchanged, while an
//! unknown operating system is fatal.

use thiserror::Error;

/// Operating systems earthbuild is released for.
pub const SUPPORTED_PLATFORMS: [&str; 5] = ["darwin", "freebsd", "linux", "openbsd", "windows"];

#[derive(Debug, Error)]
#[error(
    "Unsupported operating system - earthbuild is only released for {}",
    SUPPORTED_PLATFORMS.join(", ")
)]
pub struct UnsupportedPlatform;

/// Release platform name for a host operating system.
pub fn release_platform(os: &str) -> Result<&'static str, UnsupportedPlatform> {
    match os {
        "macos" => Ok("darwin"),
        "freebsd" => Ok("freebsd"),
        "linux" => Ok("linux"),
        "openbsd" => Ok("openbsd"),
        "windows" => Ok("windows"),
        _ => Err(UnsupportedPlatform),
    }
}

/// Release architecture name for a host CPU architecture.
///
/// Architectures without an explicit mapping pass through unchanged, so a
/// release built for a new architecture works without a code change here.
pub fn release_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" | "arm" => "arm64",
        other => other,
    }
}
