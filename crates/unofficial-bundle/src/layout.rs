//! Conventional release paths and archive entry names.

use crate::{OFFICIAL_ARCHIVE, ProjectId, UNOFFICIAL_ARCHIVE, UNOFFICIAL_SUFFIX};
use std::path::{Path, PathBuf};

/// Build output artifacts that are renamed in the unofficial archive,
/// as suffixes of the project identifier.
const ARTIFACT_SUFFIXES: [&str; 4] = [".dll", ".deps.json", ".json", ".pdb"];

/// Resolves every path and entry name for one project.
///
/// The release directory is `{root}/{project}/bin/x64/Release/{project}`.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    project: ProjectId,
    unofficial_project: String,
    release_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl AsRef<Path>, project: ProjectId) -> Self {
        let release_dir = root
            .as_ref()
            .join(project.as_str())
            .join("bin")
            .join("x64")
            .join("Release")
            .join(project.as_str());
        let unofficial_project = format!("{project}{UNOFFICIAL_SUFFIX}");

        Self {
            project,
            unofficial_project,
            release_dir,
        }
    }

    #[must_use]
    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    #[must_use]
    pub fn release_dir(&self) -> &Path {
        &self.release_dir
    }

    #[must_use]
    pub fn official_archive(&self) -> PathBuf {
        self.release_dir.join(OFFICIAL_ARCHIVE)
    }

    #[must_use]
    pub fn unofficial_archive(&self) -> PathBuf {
        self.release_dir.join(UNOFFICIAL_ARCHIVE)
    }

    /// Manifest written next to the archives by the plugin packager.
    #[must_use]
    pub fn loose_manifest(&self) -> PathBuf {
        self.release_dir.join(self.official_manifest_entry())
    }

    /// Manifest entry removed from the unofficial archive.
    #[must_use]
    pub fn official_manifest_entry(&self) -> String {
        format!("{}.json", self.project)
    }

    /// Manifest entry injected into the unofficial archive.
    #[must_use]
    pub fn unofficial_manifest_entry(&self) -> String {
        format!("{}.json", self.unofficial_project)
    }

    /// The conventional build artifact names, in dll, deps.json, json, pdb order.
    #[must_use]
    pub fn artifact_names(&self) -> Vec<String> {
        ARTIFACT_SUFFIXES
            .iter()
            .map(|suffix| format!("{}{suffix}", self.project))
            .collect()
    }

    /// Replace every occurrence of the project identifier in `name`.
    ///
    /// This is plain substring replacement: `Foo.dll` becomes
    /// `FooUnofficial.dll`, and so would every other `Foo` in the name.
    #[must_use]
    pub fn unofficial_name(&self, name: &str) -> String {
        name.replace(self.project.as_str(), &self.unofficial_project)
    }

    /// Rename pairs for the entries that are conventional artifacts.
    ///
    /// Entries are matched by exact name and returned in archive order.
    /// Artifacts absent from `entries` are skipped.
    pub fn rename_plan<I, S>(&self, entries: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let artifacts = self.artifact_names();

        entries
            .into_iter()
            .filter_map(|entry| {
                let entry: &str = entry.as_ref();
                artifacts
                    .iter()
                    .any(|artifact| artifact == entry)
                    .then(|| (entry.to_string(), self.unofficial_name(entry)))
            })
            .collect()
    }
}
