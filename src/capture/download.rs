//! Writing downloaded captures to disk

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::OverlayConfig;

/// Where downloads land: configured, else the user's download directory
pub fn download_dir(config: &OverlayConfig) -> PathBuf {
    if let Some(dir) = &config.download_dir {
        return dir.clone();
    }
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Atomically write `bytes` as `dir/filename`
pub fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating download directory {}", dir.display()))?;
    let target = dir.join(filename);

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.persist(&target)
        .with_context(|| format!("writing {}", target.display()))?;

    log::info!("Saved capture to {}", target.display());
    Ok(target)
}
