use crate::commands::{read_input, save};
use crate::config::CliConfig;
use crate::error::{Error, Result};
use crate::output::{print_success, OutputFormat};
use clap::Args;
use pacs_msg::export::{copy_to_clipboard, metadata, Clipboard, ExportMetadata};
use pacs_msg::{
    build, check_structure, validate, ChargeBearer, GeneratedMessage, MessageParameters,
    MessageParametersBuilder, SettlementMethod, ValidationResult,
};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// JSON file with the message parameters (`-` for stdin)
    #[arg(long, conflicts_with_all = [
        "message_id", "amount", "currency", "debtor_name", "debtor_iban", "debtor_bic",
        "creditor_name", "creditor_iban", "creditor_bic", "description",
    ])]
    pub params: Option<String>,
    /// Message identifier (MsgId)
    #[arg(long)]
    pub message_id: Option<String>,
    /// Interbank settlement amount
    #[arg(long)]
    pub amount: Option<f64>,
    /// ISO 4217 currency code
    #[arg(long)]
    pub currency: Option<String>,
    /// Debtor name
    #[arg(long)]
    pub debtor_name: Option<String>,
    /// Debtor account IBAN
    #[arg(long)]
    pub debtor_iban: Option<String>,
    /// Debtor agent BIC
    #[arg(long)]
    pub debtor_bic: Option<String>,
    /// Creditor name
    #[arg(long)]
    pub creditor_name: Option<String>,
    /// Creditor account IBAN
    #[arg(long)]
    pub creditor_iban: Option<String>,
    /// Creditor agent BIC
    #[arg(long)]
    pub creditor_bic: Option<String>,
    /// Settlement method (CLRG, INDA, INGA, COVE); overrides `--params` [default: CLRG]
    #[arg(long)]
    pub settlement_method: Option<String>,
    /// Charge bearer (SHAR, CRED, DEBT, SLEV); overrides `--params` [default: SHAR]
    #[arg(long)]
    pub charge_bearer: Option<String>,
    /// Unstructured remittance text
    #[arg(long)]
    pub description: Option<String>,
    /// Reject implausible BIC, IBAN, currency or amount before building
    #[arg(long)]
    pub strict: bool,
    /// Save the message to the output directory
    #[arg(long)]
    pub save: bool,
    /// Filename to save under
    #[arg(long, requires = "save")]
    pub filename: Option<String>,
    /// Copy the message to the clipboard
    #[arg(long)]
    pub copy: bool,
    /// Print only the XML document
    #[arg(long)]
    pub raw: bool,
}

#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub message: GeneratedMessage,
    pub validation: ValidationResult,
    pub metadata: ExportMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
    pub copied: bool,
}

fn required<'a>(value: &'a Option<String>, flag: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::InvalidInput(format!("{} is required without --params", flag)))
}

/// Assemble the parameters from `--params` or the individual flags
///
/// `--settlement-method` and `--charge-bearer` apply in both modes and take
/// precedence over the values in the parameters file.
pub fn parameters(args: &BuildArgs) -> Result<MessageParameters> {
    if let Some(ref source) = args.params {
        let mut params = MessageParameters::from_json(&read_input(source)?)?;
        if let Some(ref method) = args.settlement_method {
            params.settlement_method = method.parse::<SettlementMethod>()?;
        }
        if let Some(ref bearer) = args.charge_bearer {
            params.charge_bearer = bearer.parse::<ChargeBearer>()?;
        }
        return Ok(params);
    }

    let amount = args
        .amount
        .ok_or_else(|| Error::InvalidInput("--amount is required without --params".to_string()))?;

    let mut builder = MessageParametersBuilder::new()
        .message_id(required(&args.message_id, "--message-id")?)
        .amount(amount, required(&args.currency, "--currency")?)
        .debtor(
            required(&args.debtor_name, "--debtor-name")?,
            required(&args.debtor_iban, "--debtor-iban")?,
            required(&args.debtor_bic, "--debtor-bic")?,
        )
        .creditor(
            required(&args.creditor_name, "--creditor-name")?,
            required(&args.creditor_iban, "--creditor-iban")?,
            required(&args.creditor_bic, "--creditor-bic")?,
        );

    if let Some(ref method) = args.settlement_method {
        builder = builder.settlement_method(method.parse::<SettlementMethod>()?);
    }
    if let Some(ref bearer) = args.charge_bearer {
        builder = builder.charge_bearer(bearer.parse::<ChargeBearer>()?);
    }
    if let Some(ref description) = args.description {
        builder = builder.description(description);
    }

    Ok(builder.build()?)
}

/// Build a message and perform the requested exports
pub async fn execute(
    args: &BuildArgs,
    config: &CliConfig,
    clipboard: &dyn Clipboard,
) -> Result<BuildResponse> {
    let params = parameters(args)?;
    if args.strict {
        params.validate()?;
    }

    let message = build(&params);
    let validation = validate(&message.xml).merge(check_structure(&message.xml));
    if !validation.valid {
        warn!(errors = ?validation.errors, "Generated message failed its own checks");
    }

    let filename = config.filename(args.filename.as_deref());
    let mut meta = metadata(&message.xml);
    meta.filename = filename.to_string();

    let saved_to = if args.save {
        let path = save(&message.xml, &config.output_dir, filename).await?;
        Some(path.display().to_string())
    } else {
        None
    };

    if args.copy {
        copy_to_clipboard(clipboard, &message.xml).await?;
    }

    debug!(uetr = %message.uetr, "Build command finished");
    Ok(BuildResponse {
        message,
        validation,
        metadata: meta,
        saved_to,
        copied: args.copy,
    })
}

pub async fn handle(
    args: &BuildArgs,
    format: OutputFormat,
    config: &CliConfig,
    clipboard: &dyn Clipboard,
) -> Result<()> {
    let response = execute(args, config, clipboard).await?;
    if args.raw {
        print!("{}", response.message.xml);
    } else {
        print_success(format, &response);
    }
    Ok(())
}
