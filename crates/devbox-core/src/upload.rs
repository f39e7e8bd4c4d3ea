//! Directory upload manifest.
//!
//! Walks an upload root and decides, entry by entry, what goes into the
//! archive sent to the API. Each root-relative path is checked once against
//! the resolved [`IgnoreMatcher`](crate::ignore::IgnoreMatcher).

use crate::config::UploadConfig;
use crate::error::{CoreError, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Kind of an uploaded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory (only recorded with `include_dirs`).
    Dir,
    /// Symbolic link, stored as a link and never followed.
    Symlink,
}

/// One entry of the upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadEntry {
    /// Path relative to the upload root, `/`-separated.
    pub path: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes (0 for directories and symlinks).
    pub size: u64,
}

/// The set of entries selected for upload, sorted by path.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadManifest {
    entries: Vec<UploadEntry>,
    excluded: usize,
}

impl UploadManifest {
    /// Walk `config.root` and collect every entry the ignore rules keep.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRoot`] if the root is not a directory,
    /// [`CoreError::TooManyEntries`] if `max_entries` is exceeded, and
    /// [`CoreError::Io`] if the walk fails. A broken ignore file is never an
    /// error; it just means no rules.
    pub async fn collect(config: &UploadConfig) -> Result<Self> {
        config.validate()?;
        let start = std::time::Instant::now();
        let root = &config.root;

        match tokio::fs::metadata(root).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => return Err(CoreError::InvalidRoot(root.clone())),
        }

        let matcher = config.ignore.resolve(root).await;
        // A `!` rule may re-include something below an excluded directory,
        // so excluded directories are only skipped when there is none.
        let prune = matcher.as_ref().is_some_and(|m| !m.has_negations());
        tracing::debug!(
            root = %root.display(),
            rules = matcher.as_ref().map_or(0, |m| m.patterns().len()),
            prune,
            "Collecting upload manifest"
        );

        let mut manifest = Self::default();
        let mut pending: Vec<(PathBuf, String)> = vec![(root.clone(), String::new())];

        while let Some((dir, prefix)) = pending.pop() {
            let mut reader = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = reader.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                let path = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                let file_type = entry.file_type().await?;
                let excluded = matcher.as_ref().is_some_and(|m| m.matches(&path));

                if file_type.is_dir() {
                    if excluded {
                        manifest.excluded += 1;
                        if prune {
                            tracing::trace!(path = %path, "Pruned excluded directory");
                            continue;
                        }
                    } else if config.include_dirs {
                        manifest.push(config, path.clone(), EntryKind::Dir, 0)?;
                    }
                    pending.push((entry.path(), path));
                    continue;
                }

                if excluded {
                    tracing::trace!(path = %path, "Excluded");
                    manifest.excluded += 1;
                    continue;
                }

                if file_type.is_symlink() {
                    manifest.push(config, path, EntryKind::Symlink, 0)?;
                } else {
                    let size = entry.metadata().await?.len();
                    manifest.push(config, path, EntryKind::File, size)?;
                }
            }
        }

        manifest.entries.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::info!(
            root = %root.display(),
            entries = manifest.entries.len(),
            excluded = manifest.excluded,
            total_size = manifest.total_size(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upload manifest collected"
        );
        Ok(manifest)
    }

    fn push(&mut self, config: &UploadConfig, path: String, kind: EntryKind, size: u64) -> Result<()> {
        if let Some(limit) = config.max_entries {
            if self.entries.len() >= limit {
                tracing::warn!(limit, "Upload entry limit reached");
                return Err(CoreError::TooManyEntries { limit });
            }
        }
        tracing::trace!(path = %path, ?kind, size, "Included");
        self.entries.push(UploadEntry { path, kind, size });
        Ok(())
    }

    /// Included entries, sorted by path.
    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    /// Paths of the included entries.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.path.as_str())
    }

    /// Sum of included file sizes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    /// Number of entries the ignore rules excluded.
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }

    /// Serialize the manifest as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
