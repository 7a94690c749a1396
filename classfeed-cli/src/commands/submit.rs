//! Submit command handler

use anyhow::{Context, Result};
use clap::Args;
use classfeed_client::SubmissionWorkflow;
use classfeed_core::domain::submission::{SubmissionInput, VideoAsset};
use serde_json::json;
use std::path::PathBuf;

use crate::config::Config;
use crate::render;

/// Arguments of `classfeed submit`
#[derive(Args)]
pub struct SubmitArgs {
    /// Video file (mp4, avi, mov, wmv, flv, webm)
    file: PathBuf,

    /// Lesson subject, e.g. mathematics or computer_science
    #[arg(short, long)]
    subject: String,

    /// Lesson theme or topic
    #[arg(short, long)]
    theme: String,

    /// Language spoken in the video (english, russian, tajik)
    #[arg(long, default_value = "english")]
    language: String,

    /// Language to show the feedback in (english, russian, tajik)
    #[arg(long, default_value = "english")]
    feedback_language: String,

    /// Print the outcome as JSON instead of a report
    #[arg(long)]
    json: bool,
}

/// Run one submission through the full workflow
pub async fn handle_submit(args: SubmitArgs, config: &Config) -> Result<()> {
    let data = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("video")
        .to_string();

    let input = SubmissionInput {
        video: VideoAsset::new(file_name, data),
        subject: args.subject,
        theme: args.theme,
        source_language: args.language,
        target_language: args.feedback_language,
    };

    let (cancel, ctrl_c) = super::cancel_on_ctrl_c();
    let outcome = SubmissionWorkflow::new(config.http_client()?, &config.client)
        .with_cancellation(cancel)
        .on_update(render::print_progress)
        .run(&input)
        .await;
    ctrl_c.abort();
    render::finish_progress();

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            render::print_failure_advice(&e);
            return Err(e.into());
        }
    };

    if args.json {
        let selection = outcome.selection.as_ref();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "job": outcome.job,
                "requested_language": outcome.requested_language,
                "language_match": selection.map(|s| &s.language_match),
                "presented": outcome.presented(),
                "result": outcome.result,
            }))?
        );
    } else {
        render::print_job(&outcome.job);
        render::print_feedback(&outcome.result, outcome.selection.as_ref());
    }

    Ok(())
}
