//! Binary entry point for `support-bot`.
//!
//! This module provides the command-line interface for support-bot with options
//! for configuration file paths and logging verbosity. It initializes the
//! necessary components and starts the service.

use clap::Parser;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use support_bot::base::{config::Config, types::Void};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Support-bot – help replies and welcome DMs for Road Workers Connect.
///
/// Serves `POST /support-bot` and `POST /welcome-message`. Settings are read
/// from environment variables, optionally layered with a TOML file:
///
/// - `SENDGRID_API_KEY` (required), `SENDGRID_API_URL`
/// - `SUPPORT_FROM_EMAIL`, `SUPPORT_TO_EMAIL`
/// - `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY` (both required)
/// - `CORS_ALLOWED_ORIGINS` (comma separated, no `*`)
/// - `SERVER_HOST`, `SERVER_PORT`, `OUTBOUND_TIMEOUT_SECS`
///
/// The process refuses to start when a required value is missing or invalid.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML file with the same keys in lower case (e.g. `supabase_url`).
    ///
    /// Values in the file take precedence over the environment. Without this
    /// flag, `.hidden/config.toml` is used when it exists.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP (endpoint from `OTEL_EXPORTER_OTLP_ENDPOINT`).
    #[arg(long)]
    otlp: bool,
}

/// Main entry point for the support-bot binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer, if requested.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_batch_exporter(exporter).build().tracer("support-bot");
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    let config = Config::load(args.config.as_deref())?;

    support_bot::start(config).await
}

// Tests.
