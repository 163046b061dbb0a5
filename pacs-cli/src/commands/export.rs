use crate::commands::{read_input, save};
use crate::config::CliConfig;
use crate::error::Result;
use crate::output::{print_success, OutputFormat};
use clap::Args;
use pacs_msg::export::{copy_to_clipboard, metadata, Clipboard, ExportMetadata};
use serde::Serialize;

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Message file (`-` for stdin)
    #[arg(long, short, default_value = "-")]
    pub input: String,
    /// Save the message to the output directory
    #[arg(long)]
    pub save: bool,
    /// Filename to save under
    #[arg(long, requires = "save")]
    pub filename: Option<String>,
    /// Copy the message to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub metadata: ExportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
    pub copied: bool,
}

/// Describe, save and copy an existing message
pub async fn execute(
    xml: &str,
    args: &ExportArgs,
    config: &CliConfig,
    clipboard: &dyn Clipboard,
) -> Result<ExportResponse> {
    let filename = config.filename(args.filename.as_deref());
    let mut meta = metadata(xml);
    meta.filename = filename.to_string();

    let saved_to = if args.save {
        let path = save(xml, &config.output_dir, filename).await?;
        Some(path.display().to_string())
    } else {
        None
    };

    if args.copy {
        copy_to_clipboard(clipboard, xml).await?;
    }

    Ok(ExportResponse {
        metadata: meta,
        saved_to,
        copied: args.copy,
    })
}

pub async fn handle(
    args: &ExportArgs,
    format: OutputFormat,
    config: &CliConfig,
    clipboard: &dyn Clipboard,
) -> Result<()> {
    let xml = read_input(&args.input)?;
    let response = execute(&xml, args, config, clipboard).await?;
    print_success(format, &response);
    Ok(())
}
