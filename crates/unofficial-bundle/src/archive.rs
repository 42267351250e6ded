//! In-place archive editing.
//!
//! [`ArchiveEditor`] is the narrow seam between the packaging pipeline and
//! whatever actually rewrites the zip. [`ZipEditor`] does it natively;
//! [`SevenZipEditor`] drives an external `7z` executable.

use crate::{BundleError, BundleResult};
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Deletes and renames entries of an existing archive in place.
pub trait ArchiveEditor {
    /// Remove the entry named exactly `name`.
    fn remove_entry(&self, archive: &Path, name: &str) -> BundleResult<()>;

    /// Apply every `(old, new)` rename as one batch.
    ///
    /// An empty mapping leaves the archive untouched.
    fn rename_entries(&self, archive: &Path, mapping: &[(String, String)]) -> BundleResult<()>;
}

/// Native editor built on the `zip` crate.
///
/// Entries are raw-copied into a sibling temporary file, so kept entries
/// are never recompressed, and the result then replaces the original.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipEditor;

impl ZipEditor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rewrite `archive`, asking `select` for each entry's new name.
    /// `None` drops the entry.
    fn rewrite<F>(archive: &Path, mut select: F) -> BundleResult<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let dir = match archive.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir)?;

        let staging = {
            let mut source = ZipArchive::new(File::open(archive)?)?;
            let mut writer = ZipWriter::new(staging);

            for index in 0..source.len() {
                let entry = source.by_index_raw(index)?;
                let name = entry.name().to_string();

                match select(&name) {
                    Some(target) if target == name => writer.raw_copy_file(entry)?,
                    Some(target) => {
                        debug!(from = %name, to = %target, "renaming entry");
                        writer.raw_copy_file_rename(entry, target)?;
                    }
                    None => debug!(entry = %name, "dropping entry"),
                }
            }

            writer.finish()?
        };

        // The staging file is created owner-only; keep the archive's mode.
        let permissions = fs::metadata(archive)?.permissions();
        staging.as_file().set_permissions(permissions)?;

        staging.persist(archive).map_err(|e| BundleError::Io(e.error))?;
        Ok(())
    }
}

impl ArchiveEditor for ZipEditor {
    fn remove_entry(&self, archive: &Path, name: &str) -> BundleResult<()> {
        require_entries(archive, [name])?;

        Self::rewrite(archive, |entry| (entry != name).then(|| entry.to_string()))
    }

    fn rename_entries(&self, archive: &Path, mapping: &[(String, String)]) -> BundleResult<()> {
        if mapping.is_empty() {
            return Ok(());
        }

        require_entries(archive, mapping.iter().map(|(old, _)| old.as_str()))?;

        Self::rewrite(archive, |entry| {
            let target = mapping
                .iter()
                .find(|(old, _)| old == entry)
                .map_or(entry, |(_, new)| new.as_str());
            Some(target.to_string())
        })
    }
}

/// Editor that shells out to a 7-Zip compatible executable.
///
/// Uses `7z d <archive> <name>` and `7z rn <archive> <old> <new> ...`.
/// Each call blocks until the tool exits; a non-zero exit is an error.
#[derive(Debug, Clone)]
pub struct SevenZipEditor {
    program: PathBuf,
}

impl SevenZipEditor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn run<'a, I>(&self, operation: &'static str, args: I) -> BundleResult<()>
    where
        I: IntoIterator<Item = &'a OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);

        debug!(command = ?cmd, "invoking archive tool");

        let status = cmd.status().map_err(|e| {
            BundleError::Io(io::Error::new(
                e.kind(),
                format!("Failed to execute {}: {e}", self.program.display()),
            ))
        })?;

        if !status.success() {
            return Err(BundleError::ToolFailed {
                tool: self.program.display().to_string(),
                operation,
                code: status.code(),
            });
        }

        Ok(())
    }
}

impl Default for SevenZipEditor {
    fn default() -> Self {
        Self::new("7z")
    }
}

impl ArchiveEditor for SevenZipEditor {
    fn remove_entry(&self, archive: &Path, name: &str) -> BundleResult<()> {
        // `7z d` exits successfully when the name is absent.
        require_entries(archive, [name])?;

        self.run(
            "delete",
            [OsStr::new("d"), archive.as_os_str(), OsStr::new(name)],
        )
    }

    fn rename_entries(&self, archive: &Path, mapping: &[(String, String)]) -> BundleResult<()> {
        if mapping.is_empty() {
            return Ok(());
        }

        let pairs = mapping
            .iter()
            .flat_map(|(old, new)| [OsStr::new(old), OsStr::new(new)]);

        self.run(
            "rename",
            [OsStr::new("rn"), archive.as_os_str()]
                .into_iter()
                .chain(pairs),
        )
    }
}

/// List entry names in archive order.
pub fn list_entries(archive: &Path) -> BundleResult<Vec<String>> {
    let archive = ZipArchive::new(File::open(archive)?)?;

    Ok((0..archive.len())
        .filter_map(|i| archive.name_for_index(i).map(String::from))
        .collect())
}

/// Append one Deflate-compressed entry without touching existing ones.
pub fn append_entry(
    archive: &Path,
    name: &str,
    contents: &[u8],
    compression_level: i64,
) -> BundleResult<()> {
    let file = OpenOptions::new().read(true).write(true).open(archive)?;
    let mut zip = ZipWriter::new_append(file)?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(compression_level));

    zip.start_file(name, options)?;
    zip.write_all(contents)?;
    zip.finish()?;

    Ok(())
}

fn require_entries<'a, I>(archive: &Path, names: I) -> BundleResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present = ZipArchive::new(File::open(archive)?)?;

    for name in names {
        if present.index_for_name(name).is_none() {
            return Err(BundleError::MissingEntry(name.to_string()));
        }
    }

    Ok(())
}
