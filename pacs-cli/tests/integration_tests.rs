use assert_matches::assert_matches;
use serial_test::serial;
use std::path::PathBuf;
use tempfile::TempDir;

use clap::Parser;
use pacs_cli::cli::{Cli, Commands};
use pacs_cli::commands::build::{self, BuildArgs};
use pacs_cli::commands::check::{self, check, ExtractArgs, ValidateArgs};
use pacs_cli::commands::export::{self, ExportArgs};
use pacs_cli::commands::read_input;
use pacs_cli::config::CliConfig;
use pacs_cli::error::{Error, Result};
use pacs_cli::output::OutputFormat;
use pacs_msg::MemoryClipboard;

/// Test environment with isolated temp directory
struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    fn config(&self) -> CliConfig {
        CliConfig::default().with_output_dir(Some(self.root.join("out")))
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.root.join(name);
        std::fs::write(&path, contents).unwrap();
        path.display().to_string()
    }
}

fn flag_args() -> BuildArgs {
    BuildArgs {
        message_id: Some("MSG-CLI-1".to_string()),
        amount: Some(100000.04),
        currency: Some("USD".to_string()),
        debtor_name: Some("Deutsche Kunde GmbH".to_string()),
        debtor_iban: Some("DE89370400440532013000".to_string()),
        debtor_bic: Some("DEUTDEDD".to_string()),
        creditor_name: Some("Digital Commerce Ltd".to_string()),
        creditor_iban: Some("GB82WEST12345698765432".to_string()),
        creditor_bic: Some("DIGCGB2L".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_build_from_flags() {
    let env = TestEnv::new().unwrap();
    let clipboard = MemoryClipboard::new();

    let response = build::execute(&flag_args(), &env.config(), &clipboard)
        .await
        .unwrap();

    assert!(response.validation.valid);
    assert!(response
        .message
        .xml
        .contains(r#"<IntrBkSttlmAmt Ccy="USD">100000.04</IntrBkSttlmAmt>"#));
    assert_eq!(response.metadata.size_bytes, response.message.xml.len());
    assert!(response.saved_to.is_none());
    assert!(!response.copied);
    assert_eq!(clipboard.contents(), None);
}

#[tokio::test]
async fn test_build_from_params_file_with_save_and_copy() {
    let env = TestEnv::new().unwrap();
    let params = env.write(
        "params.json",
        r#"{
            "messageId": "MSG-CLI-2",
            "creditorBic": "DIGCGB2L",
            "debtorBic": "DEUTDEDD",
            "amount": 250,
            "currency": "EUR",
            "creditorName": "Creditor & Co",
            "debtorName": "Debtor",
            "creditorIban": "GB82WEST12345698765432",
            "debtorIban": "DE89370400440532013000",
            "settlementMethod": "INGA",
            "chargeBearer": "CRED",
            "description": "Invoice 7"
        }"#,
    );

    let args = BuildArgs {
        params: Some(params),
        save: true,
        filename: Some("invoice7.xml".to_string()),
        copy: true,
        ..Default::default()
    };
    let clipboard = MemoryClipboard::new();
    let config = env.config();

    let response = build::execute(&args, &config, &clipboard).await.unwrap();
    let xml = &response.message.xml;
    assert!(xml.contains("<SttlmMtd>INGA</SttlmMtd>"));
    assert!(xml.contains("<ChrgBr>CRED</ChrgBr>"));
    assert!(xml.contains("<Nm>Creditor &amp; Co</Nm>"));

    let saved = config.output_dir.join("invoice7.xml");
    assert_eq!(response.saved_to, Some(saved.display().to_string()));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), *xml);
    assert_eq!(response.metadata.filename, "invoice7.xml");
    assert_eq!(clipboard.contents().as_deref(), Some(xml.as_str()));
}

#[tokio::test]
async fn test_build_missing_flag() {
    let env = TestEnv::new().unwrap();
    let args = BuildArgs {
        creditor_bic: None,
        ..flag_args()
    };

    let result = build::execute(&args, &env.config(), &MemoryClipboard::new()).await;
    assert_matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("--creditor-bic"));
}

#[tokio::test]
async fn test_build_strict_rejects_bad_iban() {
    let env = TestEnv::new().unwrap();
    let args = BuildArgs {
        debtor_iban: Some("DE00370400440532013000".to_string()),
        strict: true,
        ..flag_args()
    };

    let result = build::execute(&args, &env.config(), &MemoryClipboard::new()).await;
    assert_matches!(
        result,
        Err(Error::Pacs(pacs_msg::Error::ValidationFailed { .. }))
    );

    // without --strict the same parameters build
    let lenient = BuildArgs {
        strict: false,
        ..args
    };
    assert!(build::execute(&lenient, &env.config(), &MemoryClipboard::new())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_build_unknown_charge_bearer() {
    let env = TestEnv::new().unwrap();
    let args = BuildArgs {
        charge_bearer: Some("BOTH".to_string()),
        ..flag_args()
    };

    let result = build::execute(&args, &env.config(), &MemoryClipboard::new()).await;
    assert_matches!(
        result,
        Err(Error::Pacs(pacs_msg::Error::InvalidEnumValue { .. }))
    );
}

#[tokio::test]
async fn test_validate_and_export_saved_message() {
    let env = TestEnv::new().unwrap();
    let config = env.config();
    let built = build::execute(&flag_args(), &config, &MemoryClipboard::new())
        .await
        .unwrap();
    let path = env.write("message.xml", &built.message.xml);

    let xml = read_input(&path).unwrap();
    assert!(check(&xml, true).valid);

    let args = ExportArgs {
        input: path,
        save: true,
        filename: None,
        copy: false,
    };
    let response = export::execute(&xml, &args, &config, &MemoryClipboard::new())
        .await
        .unwrap();

    assert_eq!(response.metadata.checksum, built.metadata.checksum);
    assert_eq!(response.metadata.filename, "pacs008_message.xml");
    assert!(config.output_dir.join("pacs008_message.xml").exists());
}

#[tokio::test]
async fn test_build_flags_override_params_file() {
    let env = TestEnv::new().unwrap();
    let params = build::parameters(&flag_args()).unwrap();
    let path = env.write("params.json", &params.to_json().unwrap());

    let cli = Cli::try_parse_from([
        "pacs-cli",
        "build",
        "--params",
        path.as_str(),
        "--settlement-method",
        "COVE",
        "--charge-bearer",
        "DEBT",
    ])
    .unwrap();
    let Commands::Build(args) = cli.command else {
        panic!("expected build command");
    };

    let response = build::execute(&args, &env.config(), &MemoryClipboard::new())
        .await
        .unwrap();
    assert!(response.message.xml.contains("<SttlmMtd>COVE</SttlmMtd>"));
    assert!(response.message.xml.contains("<ChrgBr>DEBT</ChrgBr>"));

    // without the flags the file's values stand
    let from_file = BuildArgs {
        params: Some(path),
        ..Default::default()
    };
    let response = build::execute(&from_file, &env.config(), &MemoryClipboard::new())
        .await
        .unwrap();
    assert!(response.message.xml.contains("<SttlmMtd>CLRG</SttlmMtd>"));
    assert!(response.message.xml.contains("<ChrgBr>SHAR</ChrgBr>"));
}

#[tokio::test]
async fn test_validate_command_result() {
    let env = TestEnv::new().unwrap();
    let invalid = env.write("invalid.xml", "<Document></Document>");

    let args = ValidateArgs {
        input: invalid,
        strict: false,
    };
    let expected = check("<Document></Document>", false).errors.len();
    assert_matches!(
        check::handle_validate(&args, OutputFormat::Json),
        Err(Error::InvalidMessage(n)) if n == expected
    );

    let built = build::execute(&flag_args(), &env.config(), &MemoryClipboard::new())
        .await
        .unwrap();
    let valid = env.write("valid.xml", &built.message.xml);
    let args = ValidateArgs {
        input: valid.clone(),
        strict: true,
    };
    assert!(check::handle_validate(&args, OutputFormat::Text).is_ok());

    let args = ExtractArgs { input: valid };
    assert!(check::handle_extract(&args, OutputFormat::Json).is_ok());
}

#[tokio::test]
async fn test_export_command_saves_and_copies() {
    let env = TestEnv::new().unwrap();
    let config = env.config();
    let built = build::execute(&flag_args(), &config, &MemoryClipboard::new())
        .await
        .unwrap();
    let path = env.write("message.xml", &built.message.xml);

    let args = ExportArgs {
        input: path,
        save: true,
        filename: Some("exported.xml".to_string()),
        copy: true,
    };
    let clipboard = MemoryClipboard::new();
    export::handle(&args, OutputFormat::Json, &config, &clipboard)
        .await
        .unwrap();

    let saved = std::fs::read_to_string(config.output_dir.join("exported.xml")).unwrap();
    assert_eq!(saved, built.message.xml);
    assert_eq!(clipboard.contents(), Some(built.message.xml));

    let missing = ExportArgs {
        input: env.root.join("absent.xml").display().to_string(),
        save: false,
        filename: None,
        copy: false,
    };
    assert_matches!(
        export::handle(&missing, OutputFormat::Json, &config, &clipboard).await,
        Err(Error::Io(_))
    );
}

#[test]
fn test_check_reports_errors() {
    let result = check("<Document></Document>", false);
    assert!(!result.valid);
    assert!(result
        .errors
        .contains(&"Missing required element: <UETR>".to_string()));

    let strict = check("<Document></Document>", true);
    assert!(strict.errors.len() > result.errors.len());
}

#[test]
fn test_read_input_missing_file() {
    let result = read_input("/nonexistent/pacs/message.xml");
    assert_matches!(result, Err(Error::Io(_)));
}

#[test]
#[serial]
fn test_output_dir_from_environment() {
    let env = TestEnv::new().unwrap();
    std::env::set_var("PACS_OUTPUT_DIR", &env.root);

    let cli = Cli::try_parse_from(["pacs-cli", "extract", "--input", "message.xml"]).unwrap();
    std::env::remove_var("PACS_OUTPUT_DIR");

    assert_eq!(cli.output_dir, Some(env.root.clone()));
    assert_matches!(cli.command, Commands::Extract(ref args) if args.input == "message.xml");
}

#[test]
#[serial]
fn test_flag_overrides_environment() {
    std::env::set_var("PACS_FORMAT", "text");
    let cli = Cli::try_parse_from(["pacs-cli", "--format", "json", "validate", "--strict"]).unwrap();
    std::env::remove_var("PACS_FORMAT");

    assert_eq!(cli.format, "json");
    assert_matches!(cli.command, Commands::Validate(ref args) if args.strict && args.input == "-");
}

#[test]
#[serial]
fn test_params_conflicts_with_flags() {
    let result = Cli::try_parse_from([
        "pacs-cli",
        "build",
        "--params",
        "params.json",
        "--amount",
        "10",
    ]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["pacs-cli", "build", "--params", "params.json", "--save"]).unwrap();
    assert_matches!(cli.command, Commands::Build(ref args) if args.save && args.settlement_method.is_none());
}

#[test]
fn test_export_filename_requires_save() {
    let result = Cli::try_parse_from(["pacs-cli", "export", "--filename", "out.xml"]);
    assert!(result.is_err());

    let cli = Cli::try_parse_from(["pacs-cli", "export", "--save", "--filename", "out.xml"]).unwrap();
    assert_matches!(cli.command, Commands::Export(ref args) if args.filename.as_deref() == Some("out.xml"));
}

#[test]
fn test_output_format_json() {
    let format = "json".parse::<OutputFormat>().unwrap();
    assert_eq!(format, OutputFormat::Json);
}

#[test]
fn test_output_format_text() {
    let format = "TEXT".parse::<OutputFormat>().unwrap();
    assert_eq!(format, OutputFormat::Text);
}

#[test]
fn test_output_format_invalid() {
    let result = "xml".parse::<OutputFormat>();
    assert!(result.is_err());
}
