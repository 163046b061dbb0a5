//! Export helpers: metadata, file persistence and clipboard copy

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

/// Filename used when the caller does not supply one
pub const DEFAULT_FILENAME: &str = "pacs008_message.xml";

/// Encoding label of exported messages
pub const ENCODING: &str = "UTF-8";

/// Content type of exported messages
pub const CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Algorithm label of [`ExportMetadata::checksum`]
pub const CHECKSUM_ALGORITHM: &str = "sha256";

/// Descriptive metadata for an exported message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub generated_at: DateTime<Utc>,
    pub filename: String,
    pub encoding: String,
    pub content_type: String,
    /// Length of the UTF-8 encoded text
    pub size_bytes: usize,
    pub checksum_algorithm: String,
    /// Lowercase hex SHA-256 of the UTF-8 encoded text
    pub checksum: String,
}

/// Compute export metadata for the given text
pub fn metadata(xml: &str) -> ExportMetadata {
    ExportMetadata {
        generated_at: Utc::now(),
        filename: DEFAULT_FILENAME.to_string(),
        encoding: ENCODING.to_string(),
        content_type: CONTENT_TYPE.to_string(),
        size_bytes: xml.len(),
        checksum_algorithm: CHECKSUM_ALGORITHM.to_string(),
        checksum: checksum(xml),
    }
}

/// SHA-256 of the text as lowercase hex
pub fn checksum(xml: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(xml.as_bytes());
    hex::encode(hasher.finalize())
}

/// Write the text into `dir` as `filename` (or [`DEFAULT_FILENAME`])
///
/// The filename must be a single path component. The directory is created
/// when missing. Returns the path written.
pub fn persist(xml: &str, dir: &Path, filename: Option<&str>) -> Result<PathBuf> {
    let filename = filename.unwrap_or(DEFAULT_FILENAME);
    check_filename(filename)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    std::fs::write(&path, xml.as_bytes())?;

    info!(path = %path.display(), size_bytes = xml.len(), "Saved pacs.008 message");
    Ok(path)
}

fn check_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(Error::InvalidFilename("Filename cannot be empty".to_string()));
    }

    if filename == "." || filename == ".." || filename.contains(['/', '\\']) {
        return Err(Error::InvalidFilename(format!(
            "Filename must not contain path components: {}",
            filename
        )));
    }

    Ok(())
}

/// Destination for copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`
    async fn set_text(&self, text: &str) -> Result<()>;
}

/// Copy the text to the given clipboard
pub async fn copy_to_clipboard(clipboard: &dyn Clipboard, xml: &str) -> Result<()> {
    clipboard.set_text(xml).await?;
    info!(size_bytes = xml.len(), "Copied pacs.008 message to clipboard");
    Ok(())
}

/// The operating system clipboard, reached through the platform's
/// command-line utility
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    candidates: Vec<(String, Vec<String>)>,
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard {
    /// Clipboard using the utilities usual for the current platform
    pub fn new() -> Self {
        let candidates: &[(&str, &[&str])] = if cfg!(target_os = "macos") {
            &[("pbcopy", &[])]
        } else if cfg!(windows) {
            &[("clip", &[])]
        } else {
            &[
                ("wl-copy", &[]),
                ("xclip", &["-selection", "clipboard"]),
                ("xsel", &["--clipboard", "--input"]),
            ]
        };

        Self {
            candidates: candidates
                .iter()
                .map(|(program, args)| {
                    (
                        program.to_string(),
                        args.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Clipboard using an explicit utility that reads the text from stdin
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            candidates: vec![(program.into(), args)],
        }
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        for (program, args) in &self.candidates {
            let mut child = match Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(program = %program, "Clipboard utility not found");
                    continue;
                }
                Err(e) => {
                    return Err(Error::Clipboard(format!("Failed to start {}: {}", program, e)))
                }
            };

            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| Error::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
            }

            let status = child
                .wait()
                .await
                .map_err(|e| Error::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

            if !status.success() {
                return Err(Error::Clipboard(format!("{} exited with {}", program, status)));
            }
            return Ok(());
        }

        Err(Error::Clipboard(
            "No clipboard utility available on this system".to_string(),
        ))
    }
}

/// In-process clipboard
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, if anything was copied
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| (*c).clone())
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|_| Error::Clipboard("Clipboard lock poisoned".to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}
