// src/core/fs_ops.rs
//! File system operations: loading picked resumes and saving downloads

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::forms::application::Download;
use crate::types::ResumeFile;
use crate::utils::display_file_name;

pub struct FsOps;

impl FsOps {
    /// Ensure directory exists
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Read file safely
    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Load a picked file as a resume reference
    pub async fn read_resume(path: &Path) -> Result<ResumeFile> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read resume: {}", path.display()))?;

        Ok(ResumeFile::new(display_file_name(path), bytes))
    }

    /// Save a download into `dir` under its own file name.
    ///
    /// Contents are staged in a temporary file inside `dir` and only then
    /// persisted, so a failed save never leaves a partial file or a stray
    /// staging file behind.
    pub async fn save_download(dir: &Path, download: &Download) -> Result<PathBuf> {
        Self::ensure_dir_exists(dir).await?;

        let dir = dir.to_path_buf();
        let target = dir.join(download.file_name);
        let contents = download.contents.clone();
        let staged_target = target.clone();

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut staging = tempfile::NamedTempFile::new_in(&dir).with_context(|| {
                format!("Failed to create staging file in {}", dir.display())
            })?;
            staging
                .write_all(contents.as_bytes())
                .context("Failed to write download contents")?;
            staging
                .persist(&staged_target)
                .map_err(|e| e.error)
                .with_context(|| format!("Failed to save {}", staged_target.display()))?;
            Ok(())
        })
        .await
        .context("Download task panicked")??;

        info!(
            "Saved {} ({}, {} bytes)",
            target.display(),
            download.media_type,
            download.contents.len()
        );
        Ok(target)
    }
}
