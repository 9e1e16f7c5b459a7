//! Release asset download

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

/// Download `url` to `path`, creating parent directories as needed.
pub async fn download_to(client: &reqwest::Client, url: &str, path: &Path) -> Result<()> {
    info!("Downloading {url}");

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to send download request")?;

    if !response.status().is_success() {
        return Err(anyhow!("Download failed with status: {}", response.status()));
    }

    let bytes = response
        .bytes()
        .await
        .context("Failed to read download body")?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    debug!("Downloaded {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Mark a downloaded binary executable (0o755 on unix).
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .with_context(|| format!("Failed to stat {}", path.display()))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    #[tokio::test]
    async fn download_to_writes_body_into_fresh_directories() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v0.8.16/earthbuild-linux-amd64")
            .with_status(200)
            .with_body("#!/bin/sh\nbinary")
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bin/earthbuild");
        let client = reqwest::Client::new();

        download_to(
            &client,
            &format!("{}/v0.8.16/earthbuild-linux-amd64", server.url()),
            &path,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(std::fs::read(&path).unwrap(), b"#!/bin/sh\nbinary");
    }

    #[tokio::test]
    async fn download_to_fails_on_missing_asset() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v9.9.9/earthbuild-linux-amd64")
            .with_status(404)
            .create_async()
            .await;

        let temp_dir = TempDir::new().unwrap();
        let client = reqwest::Client::new();

        let result = download_to(
            &client,
            &format!("{}/v9.9.9/earthbuild-linux-amd64", server.url()),
            &temp_dir.path().join("earthbuild"),
        )
        .await;

        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn make_executable_sets_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("earthbuild");
        std::fs::write(&path, b"binary").unwrap();

        make_executable(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
