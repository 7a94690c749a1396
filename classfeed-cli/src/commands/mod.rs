//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod submit;

pub use submit::SubmitArgs;

use anyhow::Result;
use clap::Subcommand;
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a lesson video and wait for its feedback
    Submit(SubmitArgs),
    /// Show the current processing status of a job
    Status {
        /// Job ID returned by `submit`
        id: i64,
    },
    /// Follow a job until processing finishes
    Watch {
        /// Job ID returned by `submit`
        id: i64,
    },
    /// Show the feedback of a processed job
    Feedback {
        /// Job ID returned by `submit`
        id: i64,

        /// Language to show (english, russian, tajik)
        #[arg(short, long, default_value = "english")]
        language: String,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit(args) => submit::handle_submit(args, config).await,
        Commands::Status { id } => job::show_status(id, config).await,
        Commands::Watch { id } => job::watch(id, config).await,
        Commands::Feedback { id, language, json } => {
            job::show_feedback(id, &language, json, config).await
        }
    }
}

/// Token cancelled on Ctrl-C, plus the listener task to abort afterwards
fn cancel_on_ctrl_c() -> (CancellationToken, tokio::task::JoinHandle<()>) {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    (token, listener)
}
