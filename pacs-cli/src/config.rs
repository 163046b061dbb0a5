//! Configuration for the CLI.

use pacs_msg::export::DEFAULT_FILENAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings shared by every command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Directory saved messages are written to.
    pub output_dir: PathBuf,

    /// Filename used when `--filename` is not given.
    pub default_filename: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            default_filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl CliConfig {
    /// Use `dir` as the output directory when given, keeping the default otherwise.
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }

    /// The filename to save under: the explicit one, else the default.
    pub fn filename<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.default_filename)
    }
}
