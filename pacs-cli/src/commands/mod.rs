pub mod build;
pub mod check;
pub mod export;

use crate::error::Result;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read message text from a file, or from stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        debug!(bytes = text.len(), "Read message from stdin");
        Ok(text)
    } else {
        let text = std::fs::read_to_string(input)?;
        debug!(path = %input, bytes = text.len(), "Read message from file");
        Ok(text)
    }
}

/// Persist the message on the blocking pool and return the path written
pub async fn save(xml: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
    let (xml, dir, filename) = (xml.to_string(), dir.to_path_buf(), filename.to_string());
    let path = tokio::task::spawn_blocking(move || {
        pacs_msg::export::persist(&xml, &dir, Some(&filename))
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(path)
}
