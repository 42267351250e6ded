//! Unofficial bundle creation.
//!
//! The [`UnofficialPackager`] derives `latestUnofficial.zip` from a project's
//! official `latest.zip` and loose manifest.

use crate::archive::{self, ArchiveEditor, ZipEditor};
use crate::{BundleError, BundleResult, PackageConfig, PluginManifest, ProjectLayout};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Packager for unofficial plugin bundles.
///
/// # Example
///
/// ```no_run
/// use unofficial_bundle::{PackageConfig, ProjectId, SevenZipEditor, UnofficialPackager};
///
/// let config = PackageConfig::new(ProjectId::new("MyPlugin")?).with_root("build");
/// let report = UnofficialPackager::with_editor(config, SevenZipEditor::default()).run()?;
///
/// assert_eq!(report.manifest_entry, "MyPluginUnofficial.json");
/// # Ok::<(), unofficial_bundle::BundleError>(())
/// ```
#[derive(Debug)]
pub struct UnofficialPackager<E = ZipEditor> {
    config: PackageConfig,
    layout: ProjectLayout,
    editor: E,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// Path of the written unofficial archive.
    pub archive: PathBuf,
    /// Entry removed from the copied archive.
    pub removed_entry: String,
    /// `(old, new)` entry renames, in archive order.
    pub renamed: Vec<(String, String)>,
    /// Name of the injected manifest entry.
    pub manifest_entry: String,
}

impl UnofficialPackager<ZipEditor> {
    /// Create a packager that edits archives natively.
    #[must_use]
    pub fn new(config: PackageConfig) -> Self {
        Self::with_editor(config, ZipEditor::new())
    }
}

impl<E: ArchiveEditor> UnofficialPackager<E> {
    /// Create a packager using a specific archive editor.
    pub fn with_editor(config: PackageConfig, editor: E) -> Self {
        let layout = ProjectLayout::new(&config.root, config.project.clone());
        Self {
            config,
            layout,
            editor,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    #[must_use]
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    /// Build the unofficial archive.
    ///
    /// Any failure aborts the run. An archive that was already copied is
    /// left on disk as is.
    pub fn run(&self) -> BundleResult<PackageReport> {
        self.config.validate()?;

        let official = self.layout.official_archive();
        let unofficial = self.layout.unofficial_archive();

        if !official.is_file() {
            return Err(BundleError::MissingFile(official.display().to_string()));
        }

        info!(from = %official.display(), to = %unofficial.display(), "copying official archive");
        fs::copy(&official, &unofficial)?;

        let removed_entry = self.layout.official_manifest_entry();
        info!(entry = %removed_entry, "removing official manifest entry");
        self.editor.remove_entry(&unofficial, &removed_entry)?;

        let entries = archive::list_entries(&unofficial)?;
        let renamed = self.layout.rename_plan(&entries);
        for (old, new) in &renamed {
            debug!(from = %old, to = %new, "planned rename");
        }
        info!(count = renamed.len(), "renaming build artifacts");
        self.editor.rename_entries(&unofficial, &renamed)?;

        let manifest_path = self.layout.loose_manifest();
        info!(path = %manifest_path.display(), "loading manifest");
        let manifest = PluginManifest::from_file(&manifest_path)?
            .into_unofficial(&self.config.icon_base_url)?;

        let manifest_entry = self.layout.unofficial_manifest_entry();
        info!(
            entry = %manifest_entry,
            compression_level = self.config.compression_level,
            "injecting unofficial manifest"
        );
        archive::append_entry(
            &unofficial,
            &manifest_entry,
            manifest.to_json()?.as_bytes(),
            self.config.compression_level,
        )?;

        Ok(PackageReport {
            archive: unofficial,
            removed_entry,
            renamed,
            manifest_entry,
        })
    }
}
