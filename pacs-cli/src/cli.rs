//! Command-line argument definitions.

use crate::commands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pacs-cli",
    about = "Build, check and export ISO 20022 pacs.008 credit transfer messages",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, env = "PACS_FORMAT", default_value = "json")]
    pub format: String,

    /// Directory saved messages are written to [default: download directory]
    #[arg(long, global = true, env = "PACS_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a pacs.008 message
    Build(commands::build::BuildArgs),
    /// Check a pacs.008 message
    Validate(commands::check::ValidateArgs),
    /// Extract display fields from a pacs.008 message
    Extract(commands::check::ExtractArgs),
    /// Describe, save or copy an existing message
    Export(commands::export::ExportArgs),
}
