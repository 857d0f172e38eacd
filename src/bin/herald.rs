//! Submits one message through Herald and prints the delivery report.
//!
//! Usage:
//!
//! ```text
//! herald send --provider telegram_bot --recipient +79991234567 --message "hello"
//! ```
//!
//! The report is written to stdout as JSON. Logs go to stderr, filtered by
//! `RUST_LOG` or the configured `log_level`. Exit status is `0` for a
//! delivered message, `1` for a failed delivery, `2` for a rejected request,
//! and `3` for configuration or persistence problems.

use clap::{Args, Parser, Subcommand};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use herald::channel::services::ChannelRegistry;
use herald::clock::TokioSleeper;
use herald::config::{HeraldConfig, load_config, load_config_from_path};
use herald::delivery::{
    adapters::postgres::PostgresMessageStore,
    domain::DeliveryReport,
    services::{DeliveryOrchestrator, DeliveryServiceError, SubmitMessageRequest},
};
use herald::provider::{
    adapters::postgres::PostgresProviderDirectory, services::ProviderConfigResolver,
};
use mockable::DefaultClock;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Boxed error type for setup failures.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const EXIT_DELIVERY_FAILED: u8 = 1;
const EXIT_REJECTED: u8 = 2;
const EXIT_INFRASTRUCTURE: u8 = 3;

/// Herald message delivery relay.
#[derive(Debug, Parser)]
#[command(name = "herald", version, about, long_about = None)]
struct Cli {
    /// Configuration file; `./herald.toml` is used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Submit one message and print the delivery report.
    Send(SendArgs),
}

/// Fields of a send request.
#[derive(Debug, Args)]
struct SendArgs {
    /// Provider code.
    #[arg(long)]
    provider: String,
    /// Recipient phone number, chat id, or email address.
    #[arg(long)]
    recipient: String,
    /// Message body.
    #[arg(long)]
    message: String,
    /// Email subject.
    #[arg(long)]
    subject: Option<String>,
    /// Email template name.
    #[arg(long)]
    template_name: Option<String>,
    /// Email template data as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    template_data: Option<Map<String, Value>>,
    /// Caller metadata as a JSON object.
    #[arg(long, value_parser = parse_json_object)]
    metadata: Option<Map<String, Value>>,
}

impl SendArgs {
    fn into_request(self) -> SubmitMessageRequest {
        let mut request = SubmitMessageRequest::new(self.provider, self.recipient, self.message)
            .with_metadata(self.metadata.unwrap_or_default());
        if let Some(subject) = self.subject {
            request = request.with_subject(subject);
        }
        if let Some(name) = self.template_name {
            request = request.with_template(name, self.template_data.unwrap_or_default());
        }
        request
    }
}

fn parse_json_object(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_owned()),
        Err(err) => Err(err.to_string()),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let loaded = match cli.config.as_deref() {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!(error = %err, "configuration rejected");
            return ExitCode::from(EXIT_INFRASTRUCTURE);
        }
    };
    init_tracing(&config.log_level);

    match cli.command {
        Command::Send(args) => send(&config, cli.config.as_deref(), args).await,
    }
}

async fn send(config: &HeraldConfig, config_path: Option<&Path>, args: SendArgs) -> ExitCode {
    let orchestrator = match build_orchestrator(config) {
        Ok(orchestrator) => orchestrator,
        Err(err) => {
            error!(error = %err, config = ?config_path, "startup failed");
            return ExitCode::from(EXIT_INFRASTRUCTURE);
        }
    };

    match orchestrator.submit(args.into_request()).await {
        Ok(report) => {
            let code = if report.is_delivered() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_DELIVERY_FAILED)
            };
            match print_report(&report) {
                Ok(()) => code,
                Err(err) => {
                    error!(error = %err, "could not write report");
                    ExitCode::from(EXIT_INFRASTRUCTURE)
                }
            }
        }
        Err(err) => {
            error!(error = %err, "submission rejected");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

type PgOrchestrator = DeliveryOrchestrator<
    PostgresMessageStore,
    PostgresMessageStore,
    PostgresProviderDirectory,
    DefaultClock,
>;

fn build_orchestrator(config: &HeraldConfig) -> Result<PgOrchestrator, BoxError> {
    let url = config
        .database
        .url
        .as_deref()
        .ok_or("database.url is not configured")?;
    let pool = Pool::builder()
        .max_size(config.database.max_connections)
        .build_unchecked(ConnectionManager::<PgConnection>::new(url));
    let store = Arc::new(PostgresMessageStore::new(pool.clone()));
    let directory = Arc::new(PostgresProviderDirectory::new(pool));
    let clock = Arc::new(DefaultClock);
    let channels = ChannelRegistry::from_settings(
        &config.channels(),
        Arc::new(DefaultClock),
        Arc::new(TokioSleeper),
    )?;
    info!(attempts = config.retry.delays_secs.len(), "delivery pipeline ready");

    Ok(DeliveryOrchestrator::new(
        Arc::clone(&store),
        store,
        ProviderConfigResolver::new(directory),
        channels,
        clock,
    )
    .with_retry_policy(config.retry_policy()?)
    .with_attempt_log_durability(config.attempt_log.durability))
}

fn print_report(report: &DeliveryReport) -> Result<(), BoxError> {
    let json = serde_json::to_string(report)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

const fn exit_code_for(err: &DeliveryServiceError) -> u8 {
    match err {
        DeliveryServiceError::InvalidRequest(_)
        | DeliveryServiceError::UnknownProvider(_)
        | DeliveryServiceError::ProviderInactive { .. } => EXIT_REJECTED,
        DeliveryServiceError::Directory(_)
        | DeliveryServiceError::MessageStore(_)
        | DeliveryServiceError::AttemptLog(_)
        | DeliveryServiceError::Lifecycle(_) => EXIT_INFRASTRUCTURE,
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("herald={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
