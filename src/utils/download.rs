use std::path::Path;

use log::info;

/// Download Error
#[derive(thiserror::Error, Debug)]
pub enum DownloadError {
    /// The request failed or the server answered with an error status
    #[error("request to {url} failed: {source}")]
    Http {
        /// The requested URL
        url: String,

        /// The underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The downloaded bytes could not be written
    #[error("unable to write {path}: {source}")]
    Io {
        /// The destination path
        path: String,

        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Download a file to the given path.
/// If the file exists already, it will not be downloaded again. Returns `true` when a download
/// took place.
pub async fn download_if_missing(url: &str, path: &Path) -> Result<bool, DownloadError> {
    if path.exists() {
        info!("{} already exists", path.display());

        return Ok(false);
    }

    info!("Downloading {} to {}...", url, path.display());

    let http = |source| DownloadError::Http {
        url: url.to_string(),
        source,
    };

    let bytes = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(http)?
        .bytes()
        .await
        .map_err(http)?;

    super::files::write_atomic_async(path, &bytes)
        .await
        .map_err(|source| DownloadError::Io {
            path: path.display().to_string(),
            source,
        })?;

    info!("Download complete ({} bytes)", bytes.len());

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn skips_existing_files() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let downloaded = download_if_missing("http://127.0.0.1:9/unused", file.path())
            .await
            .unwrap();

        assert!(!downloaded);
    }

    #[tokio::test]
    async fn reports_unreachable_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let result = download_if_missing("http://127.0.0.1:9/missing.csv", &path).await;

        assert!(matches!(result, Err(DownloadError::Http { .. })));
        assert!(!path.exists());
    }
}
