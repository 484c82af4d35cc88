//! Asset resolution and fetching.
//!
//! Assets are addressed by filesystem path or `http(s)` URL. Remote assets
//! are downloaded once into the platform cache directory and re-used on
//! subsequent loads.

use crate::constants::{APP_NAME, download};
use crate::error::{Error, Result};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Whether a location refers to a remote asset.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Cache directory for downloaded assets.
fn cache_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME).ok_or(Error::CacheDirNotFound)?;
    Ok(dirs.cache_dir().join("assets"))
}

/// Cache file name derived from the last URL path segment.
fn cache_file_name(url: &str) -> &str {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("asset")
}

/// Download a remote asset into memory.
async fn download_bytes(url: &str) -> Result<Vec<u8>> {
    let fetch_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::AssetFetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .connect_timeout(Duration::from_secs(download::CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(download::TIMEOUT_SECS))
        .build()
        .map_err(|e| fetch_error(Box::new(e)))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(Box::new(e)))?;

    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP {}", response.status()).into()));
    }

    let mut stream = response.bytes_stream();
    let mut bytes = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| fetch_error(Box::new(e)))?;
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

/// Load an asset from a path or URL.
///
/// Local paths are read directly. Remote assets are served from the cache
/// when present, otherwise downloaded and cached.
pub async fn fetch_asset(location: &str) -> Result<Vec<u8>> {
    if !is_remote(location) {
        debug!("Reading asset: {location}");
        return Ok(tokio::fs::read(location).await?);
    }

    let dir = cache_dir()?;
    let cached = dir.join(cache_file_name(location));
    if cached.exists() {
        debug!("Using cached asset: {}", cached.display());
        return Ok(tokio::fs::read(&cached).await?);
    }

    info!("Downloading asset: {location}");
    let bytes = download_bytes(location).await?;
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(&cached, &bytes).await?;
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/model.onnx"));
        assert!(is_remote("http://example.com/model.onnx"));
        assert!(!is_remote("models/fishnet.onnx"));
        assert!(!is_remote("/absolute/path/labels.json"));
    }

    #[test]
    fn test_cache_file_name() {
        assert_eq!(
            cache_file_name("https://example.com/models/fishnet.onnx"),
            "fishnet.onnx"
        );
        assert_eq!(cache_file_name("https://example.com/"), "asset");
    }

    #[tokio::test]
    async fn test_fetch_local_asset() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"weights").unwrap();

        let bytes = fetch_asset(&file.path().to_string_lossy()).await.unwrap();
        assert_eq!(bytes, b"weights");
    }

    #[tokio::test]
    async fn test_fetch_missing_local_asset() {
        let result = fetch_asset("/nonexistent/fishnet.onnx").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
