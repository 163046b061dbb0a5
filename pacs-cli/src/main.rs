use clap::Parser;
use pacs_cli::cli::{Cli, Commands};
use pacs_cli::commands;
use pacs_cli::config::CliConfig;
use pacs_cli::output::{self, OutputFormat};
use pacs_msg::SystemClipboard;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let format = cli.format.parse::<OutputFormat>().unwrap_or_else(|_| {
        eprintln!("Warning: unknown format '{}', using json", cli.format);
        OutputFormat::Json
    });

    // Initialize logging to stderr
    let level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pacs_cli={},pacs_msg={}", level, level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .init();

    let config = CliConfig::default().with_output_dir(cli.output_dir);
    let clipboard = SystemClipboard::new();
    info!(output_dir = %config.output_dir.display(), "pacs-cli initialized");

    let result = match cli.command {
        Commands::Build(ref args) => commands::build::handle(args, format, &config, &clipboard).await,
        Commands::Validate(ref args) => commands::check::handle_validate(args, format),
        Commands::Extract(ref args) => commands::check::handle_extract(args, format),
        Commands::Export(ref args) => {
            commands::export::handle(args, format, &config, &clipboard).await
        }
    };

    if let Err(e) = result {
        output::print_error(format, &e.to_string());
        std::process::exit(1);
    }
}
