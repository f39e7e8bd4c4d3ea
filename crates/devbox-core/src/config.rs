//! Upload configuration types.

use crate::error::CoreError;
use crate::ignore::IgnoreSource;
use std::path::PathBuf;

/// Configuration for packaging a local directory.
#[derive(Debug, Clone, Default)]
pub struct UploadConfig {
    /// Directory to upload.
    pub root: PathBuf,
    /// Where ignore rules come from (default: `.dockerignore` in `root`).
    pub ignore: IgnoreSource,
    /// Record directories as manifest entries (default: false).
    pub include_dirs: bool,
    /// Abort the walk once this many entries are included.
    pub max_entries: Option<usize>,
}

impl UploadConfig {
    /// Create a new config builder.
    pub fn builder() -> UploadConfigBuilder {
        UploadConfigBuilder::default()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.root.as_os_str().is_empty() {
            return Err(CoreError::Config("root is required".into()));
        }
        if self.max_entries == Some(0) {
            return Err(CoreError::Config("max_entries must be > 0".into()));
        }
        Ok(())
    }
}

/// Builder for UploadConfig.
#[derive(Debug, Default)]
pub struct UploadConfigBuilder {
    config: UploadConfig,
}

impl UploadConfigBuilder {
    /// Set the upload root.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root = path.into();
        self
    }

    /// Set the ignore source.
    pub fn ignore(mut self, source: IgnoreSource) -> Self {
        self.config.ignore = source;
        self
    }

    /// Read ignore rules from an explicit file.
    pub fn ignore_file(self, path: impl Into<PathBuf>) -> Self {
        self.ignore(IgnoreSource::File(path.into()))
    }

    /// Use inline ignore rules.
    pub fn ignore_patterns<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore(IgnoreSource::Patterns(
            lines.into_iter().map(Into::into).collect(),
        ))
    }

    /// Record directories in the manifest.
    pub fn include_dirs(mut self, include: bool) -> Self {
        self.config.include_dirs = include;
        self
    }

    /// Set the maximum number of included entries.
    pub fn max_entries(mut self, limit: usize) -> Self {
        self.config.max_entries = Some(limit);
        self
    }

    /// Build the configuration, validating all required fields.
    pub fn build(self) -> Result<UploadConfig, CoreError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
