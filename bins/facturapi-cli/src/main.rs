//! Facturapi CLI
//!
//! Webhook signature tooling, document downloads and raw API access.

use clap::{Parser, Subcommand};
use facturapi_client::{ApiVersion, ClientConfig, FacturapiClient};
use facturapi_telemetry::{TelemetryConfig, Timer};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::{api, download, webhook};

/// Command-line client for the Facturapi API
#[derive(Parser)]
#[command(name = "facturapi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Secret API key
    #[arg(long, global = true, env = "FACTURAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API version (v1, v2)
    #[arg(long, global = true, env = "FACTURAPI_API_VERSION")]
    api_version: Option<ApiVersion>,

    /// Override the API base URL
    #[arg(long, global = true, env = "FACTURAPI_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where a webhook body comes from
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct PayloadSource {
    /// Read the raw body from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Raw body given inline
    #[arg(short, long)]
    payload: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the signature of a webhook body
    SignWebhook {
        /// Webhook endpoint secret
        #[arg(short, long)]
        secret: String,

        #[command(flatten)]
        source: PayloadSource,
    },

    /// Verify a webhook body against its Facturapi-Signature header
    VerifyWebhook {
        /// Webhook endpoint secret
        #[arg(short, long)]
        secret: String,

        /// Hex signature from the Facturapi-Signature header
        #[arg(long)]
        signature: String,

        #[command(flatten)]
        source: PayloadSource,
    },

    /// Download a document file
    Download {
        /// Document type
        #[arg(value_enum)]
        kind: download::DocumentKind,

        /// Document ID
        id: String,

        /// File format
        #[arg(long, value_enum, default_value = "pdf")]
        format: download::FileFormat,

        /// Destination path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check an RFC against the SAT registry
    ValidateTaxId {
        /// RFC to validate
        tax_id: String,
    },

    /// Perform a raw GET request
    Get {
        /// Path relative to the API base URL, e.g. /invoices
        path: String,

        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = api::parse_param)]
        params: Vec<(String, String)>,
    },
}

impl Cli {
    fn client(&self) -> anyhow::Result<FacturapiClient> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("an API key is required (--api-key or FACTURAPI_KEY)"))?;

        let mut config = ClientConfig::new(api_key);
        if let Some(version) = self.api_version {
            config = config.with_api_version(version);
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        Ok(FacturapiClient::with_config(config)?)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::SignWebhook { secret, source } => {
            let body = webhook::read_payload(source.file.as_deref(), source.payload.as_deref())?;
            webhook::sign(secret, &body)
        }
        Commands::VerifyWebhook {
            secret,
            signature,
            source,
        } => {
            let body = webhook::read_payload(source.file.as_deref(), source.payload.as_deref())?;
            webhook::verify(secret, signature, body).await
        }
        Commands::Download {
            kind,
            id,
            format,
            output,
        } => download::run(&cli.client()?, *kind, id, *format, output).await,
        Commands::ValidateTaxId { tax_id } => api::validate_tax_id(&cli.client()?, tax_id).await,
        Commands::Get { path, params } => api::get(&cli.client()?, path, params).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = facturapi_telemetry::init_with_config(TelemetryConfig::for_cli(cli.verbose, cli.json_logs)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let timer = Timer::start("facturapi-cli");
    let result = run(cli).await;
    timer.stop();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
