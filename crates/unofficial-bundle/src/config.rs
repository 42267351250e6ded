//! Packaging configuration types

use crate::{BundleError, BundleResult, DEFAULT_COMPRESSION_LEVEL, DEFAULT_ICON_BASE_URL};
use std::fmt;
use std::path::PathBuf;

/// Name of the plugin project being repackaged.
///
/// Every conventional path and archive entry name is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create a project identifier, rejecting blank names.
    pub fn new(name: impl Into<String>) -> BundleResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BundleError::InvalidConfig(
                "Project identifier cannot be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Configuration for a single packaging run
#[derive(Debug, Clone)]
pub struct PackageConfig {
    /// Project whose release output is repackaged
    pub project: ProjectId,

    /// Directory the conventional release paths are resolved against
    pub root: PathBuf,

    /// Deflate level (0-9) used for the injected manifest entry
    pub compression_level: i64,

    /// Base URL under which `{InternalName}.png` icons are hosted
    pub icon_base_url: String,
}

impl PackageConfig {
    /// Create a configuration rooted at the current directory
    pub fn new(project: ProjectId) -> Self {
        Self {
            project,
            root: PathBuf::from("."),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn with_compression_level(mut self, level: i64) -> Self {
        self.compression_level = level;
        self
    }

    #[must_use]
    pub fn with_icon_base_url(mut self, url: impl Into<String>) -> Self {
        self.icon_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> BundleResult<()> {
        if !(0..=9).contains(&self.compression_level) {
            return Err(BundleError::InvalidConfig(format!(
                "Compression level must be between 0 and 9, got {}",
                self.compression_level
            )));
        }

        if self.icon_base_url.is_empty() {
            return Err(BundleError::InvalidConfig(
                "Icon base URL cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
