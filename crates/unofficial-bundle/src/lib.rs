//! Unofficial plugin bundle derivation
//!
//! This crate turns a plugin's official release archive into a secondary
//! "unofficial/uncertified" archive that can be installed side by side with
//! the official one.
//!
//! # Release Directory
//!
//! ```text
//! MyPlugin/bin/x64/Release/MyPlugin/
//! ├── latest.zip               # official archive (input, never modified)
//! ├── MyPlugin.json            # loose manifest (input)
//! └── latestUnofficial.zip     # unofficial archive (output)
//! ```
//!
//! Inside the unofficial archive the official `MyPlugin.json` is dropped,
//! `MyPlugin.dll`, `MyPlugin.deps.json` and `MyPlugin.pdb` become
//! `MyPluginUnofficial.*`, and a rewritten manifest is added as
//! `MyPluginUnofficial.json`.
//!
//! # Example
//!
//! ```no_run
//! use unofficial_bundle::{PackageConfig, ProjectId, UnofficialPackager};
//!
//! let config = PackageConfig::new(ProjectId::new("MyPlugin")?);
//! let report = UnofficialPackager::new(config).run()?;
//! println!("wrote {}", report.archive.display());
//! # Ok::<(), unofficial_bundle::BundleError>(())
//! ```

mod config;
mod error;
mod layout;
mod manifest;

pub mod archive;
pub mod packager;

pub use archive::{ArchiveEditor, SevenZipEditor, ZipEditor};
pub use config::{PackageConfig, ProjectId};
pub use error::BundleError;
pub use layout::ProjectLayout;
pub use manifest::PluginManifest;
pub use packager::{PackageReport, UnofficialPackager};

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;

/// Suffix appended to the project identifier and internal name.
pub const UNOFFICIAL_SUFFIX: &str = "Unofficial";

/// File name of the official archive in the release directory.
pub const OFFICIAL_ARCHIVE: &str = "latest.zip";

/// File name of the unofficial archive in the release directory.
pub const UNOFFICIAL_ARCHIVE: &str = "latestUnofficial.zip";

/// Default Deflate level for the injected manifest entry.
pub const DEFAULT_COMPRESSION_LEVEL: i64 = 7;

/// Default location of hosted plugin icons.
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/WorkingRobot/MyDalamudPlugins/main/icons";
