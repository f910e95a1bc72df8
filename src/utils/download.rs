//! Fetching model files over HTTP with the system's curl or wget.

use std::path::Path;
use std::process::Command;

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Failed to download {0}")]
    Failed(String),

    #[error("Neither curl nor wget found. Install one to download models.")]
    NoDownloader,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Download a file from a URL to a local path using curl, falling back to wget.
pub fn download_file(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let status = Command::new("curl")
        .args(["-fsSL", "-o"])
        .arg(dest)
        .arg(url)
        .status();

    match status {
        Ok(status) if status.success() => Ok(()),
        Ok(_) => {
            let _ = std::fs::remove_file(dest);
            Err(DownloadError::Failed(url.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let status = Command::new("wget")
                .args(["-q", "-O"])
                .arg(dest)
                .arg(url)
                .status();

            match status {
                Ok(status) if status.success() => Ok(()),
                Ok(_) => {
                    let _ = std::fs::remove_file(dest);
                    Err(DownloadError::Failed(url.to_string()))
                }
                Err(_) => Err(DownloadError::NoDownloader),
            }
        }
        Err(e) => Err(DownloadError::Io(e)),
    }
}

/// Download `url` to `dest` unless the file already exists.
///
/// The download lands in a temporary file next to `dest` and is moved into
/// place only once complete, so an interrupted fetch never leaves a partial
/// `dest`. Returns `true` when a download happened.
pub fn ensure_file(url: &str, dest: &Path) -> Result<bool, DownloadError> {
    if dest.exists() {
        return Ok(false);
    }
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    tracing::info!("Downloading {} to {}", url, dest.display());
    let partial = NamedTempFile::new_in(dir)?;
    download_file(url, partial.path())?;
    partial.persist(dest).map_err(|e| DownloadError::Io(e.error))?;
    Ok(true)
}
