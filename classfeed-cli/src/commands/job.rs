//! Job command handlers
//!
//! Status lookups, following a job, and reading its feedback.

use anyhow::Result;
use classfeed_client::JobPoller;
use classfeed_core::to_backend_code;

use crate::config::Config;
use crate::render;

/// Fetch and display one status snapshot
pub async fn show_status(id: i64, config: &Config) -> Result<()> {
    let client = config.http_client()?;
    let status = client.get_status(id).await?;

    render::print_status(&status);

    Ok(())
}

/// Poll a job until it is completed or failed
pub async fn watch(id: i64, config: &Config) -> Result<()> {
    let (cancel, ctrl_c) = super::cancel_on_ctrl_c();
    let poller = JobPoller::from_config(config.http_client()?, &config.client)
        .with_cancellation(cancel);

    let outcome = poller.poll(id, render::print_status_line).await;
    ctrl_c.abort();

    let status = match outcome {
        Ok(status) => status,
        Err(e) => {
            render::print_failure_advice(&e);
            return Err(e.into());
        }
    };

    println!();
    render::print_status(&status);

    Ok(())
}

/// Fetch a job's feedback and display it in the requested language
pub async fn show_feedback(id: i64, language: &str, json: bool, config: &Config) -> Result<()> {
    let client = config.http_client()?;
    let result = client.get_feedback(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let selection = result.select(to_backend_code(language));
    render::print_feedback(&result, selection.as_ref());

    Ok(())
}
