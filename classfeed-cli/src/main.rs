//! Classfeed CLI
//!
//! Command-line front-end for the lesson analysis service: submit a video,
//! follow its processing and read the feedback.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use classfeed_client::config::{DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL_MS};
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "classfeed")]
#[command(about = "Classroom video feedback CLI", long_about = None)]
struct Cli {
    /// Analysis service URL
    #[arg(long, env = "CLASSFEED_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Delay between status requests, in milliseconds
    #[arg(long, env = "CLASSFEED_POLL_INTERVAL_MS", default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    poll_interval_ms: u64,

    /// Stop waiting for processing after this many seconds
    #[arg(long, env = "CLASSFEED_MAX_WAIT_SECS")]
    max_wait_secs: Option<u64>,

    /// Per-request timeout, in seconds
    #[arg(long, env = "CLASSFEED_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classfeed=info,classfeed_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.api_url,
        cli.poll_interval_ms,
        cli.max_wait_secs,
        cli.request_timeout_secs,
    )?;

    handle_command(cli.command, &config).await
}
