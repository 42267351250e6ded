//! Packaging command implementation

use crate::{Cli, EditorKind};
use anyhow::{Context, Result};
use tracing::info;
use unofficial_bundle::{
    ArchiveEditor, PackageConfig, PackageReport, ProjectId, SevenZipEditor, UnofficialPackager,
    ZipEditor,
};

/// Run the packaging pipeline described by the command line.
pub fn run(cli: &Cli) -> Result<()> {
    let project = ProjectId::new(cli.project.as_str()).context("Invalid project identifier")?;
    let config = PackageConfig::new(project)
        .with_root(&cli.root)
        .with_compression_level(cli.compression_level);

    let report = match cli.editor {
        EditorKind::Zip => package(config, ZipEditor::new())?,
        EditorKind::SevenZip => package(config, SevenZipEditor::new(&cli.seven_zip))?,
    };

    info!(
        archive = %report.archive.display(),
        renamed = report.renamed.len(),
        "unofficial bundle created"
    );
    Ok(())
}

fn package<E: ArchiveEditor>(config: PackageConfig, editor: E) -> Result<PackageReport> {
    let project = config.project.clone();
    let packager = UnofficialPackager::with_editor(config, editor);

    packager
        .run()
        .with_context(|| format!("Failed to create unofficial bundle for {project}"))
}
