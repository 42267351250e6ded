//! create-unofficial - derive an unofficial plugin release
//!
//! Reads `{project}/bin/x64/Release/{project}/latest.zip` and the loose
//! `{project}.json` manifest next to it, and writes `latestUnofficial.zip`
//! in the same directory.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

mod logging;
mod package;

#[derive(Parser, Debug)]
#[command(name = "create-unofficial")]
#[command(author, version, about = "Build an unofficial/uncertified plugin archive", long_about = None)]
struct Cli {
    /// Project identifier (plugin name)
    project: String,

    /// Directory containing the project folder
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// How archive entries are deleted and renamed
    #[arg(long, value_enum, default_value_t = EditorKind::Zip)]
    editor: EditorKind,

    /// 7-Zip executable used by `--editor 7z`
    #[arg(long, default_value = "7z")]
    seven_zip: PathBuf,

    /// Deflate level for the injected manifest
    #[arg(long, default_value_t = unofficial_bundle::DEFAULT_COMPRESSION_LEVEL,
          value_parser = clap::value_parser!(i64).range(0..=9))]
    compression_level: i64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Archive editing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EditorKind {
    /// Native zip rewriting
    Zip,
    /// External 7-Zip executable
    #[value(name = "7z")]
    SevenZip,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    package::run(&cli)
}
