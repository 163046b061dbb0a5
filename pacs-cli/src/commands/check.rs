use crate::commands::read_input;
use crate::error::{Error, Result};
use crate::output::{print_success, OutputFormat};
use clap::Args;
use pacs_msg::{check_structure, extract, validate, ExtractedFields, ValidationResult};

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Message file (`-` for stdin)
    #[arg(long, short, default_value = "-")]
    pub input: String,
    /// Also parse the document and check element placement
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// Message file (`-` for stdin)
    #[arg(long, short, default_value = "-")]
    pub input: String,
}

/// Check a message, optionally including the structural check
pub fn check(xml: &str, strict: bool) -> ValidationResult {
    let result = validate(xml);
    if strict {
        result.merge(check_structure(xml))
    } else {
        result
    }
}

pub fn handle_validate(args: &ValidateArgs, format: OutputFormat) -> Result<()> {
    let xml = read_input(&args.input)?;
    let result = check(&xml, args.strict);
    print_success(format, &result);

    if result.valid {
        Ok(())
    } else {
        Err(Error::InvalidMessage(result.errors.len()))
    }
}

pub fn handle_extract(args: &ExtractArgs, format: OutputFormat) -> Result<()> {
    let xml = read_input(&args.input)?;
    let fields: ExtractedFields = extract(&xml);
    print_success(format, &fields);
    Ok(())
}
