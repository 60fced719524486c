use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// The portal exports either format depending on tenant configuration.
const SPREADSHEET_PATTERNS: &[&str] = &["*.xlsx", "*.xls"];

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poll the download directory until an exported spreadsheet appears.
///
/// Resolves to the most recently modified spreadsheet in the directory.
/// Latest-mtime resolution assumes one session writes to the directory at a
/// time; the sequential account loop and inter-account delay uphold that.
pub async fn wait_for_latest_spreadsheet(dir: &Path, timeout: Duration) -> Result<PathBuf> {
    let deadline = std::time::Instant::now() + timeout;

    loop {
        if let Some(path) = latest_spreadsheet(dir)? {
            tracing::info!("Export landed at: {}", path.display());
            return Ok(path);
        }
        if std::time::Instant::now() >= deadline {
            return Err(Error::DownloadTimeout {
                dir: dir.to_path_buf(),
                timeout,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Most recently modified spreadsheet in `dir`, if any.
fn latest_spreadsheet(dir: &Path) -> Result<Option<PathBuf>> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for pattern in SPREADSHEET_PATTERNS {
        let full_pattern = dir.join(pattern).display().to_string();
        let paths = glob::glob(&full_pattern)
            .map_err(|e| Error::Browser(format!("Bad download pattern {full_pattern}: {e}")))?;

        for entry in paths.flatten() {
            let modified = std::fs::metadata(&entry)?.modified()?;
            if latest.as_ref().is_none_or(|(when, _)| modified > *when) {
                latest = Some((modified, entry));
            }
        }
    }

    Ok(latest.map(|(_, path)| path))
}
