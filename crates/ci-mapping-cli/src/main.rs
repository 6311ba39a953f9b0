//! `ci-mapping` - HMRC contra-indicator mapper CLI
//!
//! Runs the mapping handler over a single event, the way the hosting
//! workflow step does.
//!
//! ## Commands
//!
//! - `resolve`: map an event's HMRC errors to deduplicated contra-indicators
//! - `validate`: check an event's mapping tables without resolving
//! - `issue`: resolve from parameter-store tables for credential issuance

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{info, Level};

use ci_mapping_core::config::{ERROR_MAPPING_ENV, REASONS_MAPPING_ENV};
use ci_mapping_core::{CiMappingConfig, CiMappingEvent, CiMappingHandler, ContraIndicator};

#[derive(Parser)]
#[command(name = "ci-mapping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map HMRC errors to contra-indicators", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an event to a deduplicated contra-indicator list
    Resolve {
        /// Path to the event JSON, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },

    /// Validate an event's mapping tables without resolving
    Validate {
        /// Path to the event JSON, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        event: PathBuf,
    },

    /// Resolve HMRC errors against parameter-store tables (credential issuance)
    Issue {
        /// Comma-separated HMRC error codes; may be empty
        #[arg(long, default_value = "")]
        hmrc_errors: String,

        /// Journey id used to correlate log lines
        #[arg(long)]
        journey_id: Option<String>,

        /// `||`-separated error mapping, e.g. `aaaa:ci_1||bbbb,cccc:ci_2`
        #[arg(long, env = ERROR_MAPPING_ENV)]
        mappings: String,

        /// JSON array of `{ci, reason}` objects
        #[arg(long, env = REASONS_MAPPING_ENV)]
        reasons: String,
    },
}

/// Summary printed by `validate`.
#[derive(Debug, Serialize, PartialEq)]
struct ValidationSummary {
    valid: bool,
    mapping_entries: usize,
    reason_entries: usize,
    hmrc_error_tokens: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    ci_mapping_core::init_tracing(cli.json, level);

    let handler = CiMappingHandler::with_tracing();

    match cli.command {
        Commands::Resolve { event } => {
            let indicators = cmd_resolve(&handler, &event).await?;
            print_json(&indicators)
        }
        Commands::Validate { event } => {
            let summary = cmd_validate(&handler, &event).await?;
            print_json(&summary)
        }
        Commands::Issue {
            hmrc_errors,
            journey_id,
            mappings,
            reasons,
        } => {
            let indicators = cmd_issue(&handler, &hmrc_errors, journey_id, &mappings, &reasons)?;
            print_json(&indicators)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn read_event(path: &Path) -> Result<CiMappingEvent> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read event from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {}", path.display()))?
    };

    serde_json::from_str(&raw).context("Event is not a valid CiMappingEvent")
}

async fn cmd_resolve(handler: &CiMappingHandler, event_path: &Path) -> Result<Vec<ContraIndicator>> {
    let event = read_event(event_path).await?;
    let indicators = handler.handle(&event)?;
    info!(journey_id = %event.journey_id(), count = indicators.len(), "Resolved event");
    Ok(indicators)
}

async fn cmd_validate(handler: &CiMappingHandler, event_path: &Path) -> Result<ValidationSummary> {
    let event = read_event(event_path).await?;
    let validated = handler.validate_only(&event)?;
    Ok(ValidationSummary {
        valid: true,
        mapping_entries: validated.entries.len(),
        reason_entries: validated.reasons.len(),
        hmrc_error_tokens: validated.tokens.len(),
    })
}

fn cmd_issue(
    handler: &CiMappingHandler,
    hmrc_errors: &str,
    journey_id: Option<String>,
    mappings: &str,
    reasons: &str,
) -> Result<Vec<ContraIndicator>> {
    let config = CiMappingConfig::from_parameters(mappings, reasons)
        .context("Failed to load contra-indicator configuration")?;

    let errors = if hmrc_errors.trim().is_empty() {
        Vec::new()
    } else {
        vec![hmrc_errors.to_string()]
    };

    let event = config.event_for(errors, journey_id);
    Ok(handler.contra_indicators_for_credential(&event)?)
}
