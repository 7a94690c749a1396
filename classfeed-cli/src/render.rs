//! Terminal rendering
//!
//! Everything printed by the CLI goes through here. Progress lines are
//! written to stderr so `--json` output on stdout stays parseable.

use classfeed_client::{ClientError, ErrorKind, SubmissionState, WorkflowSnapshot};
use classfeed_core::domain::feedback::{FeedbackResult, FeedbackSelection, LanguageMatch};
use classfeed_core::domain::job::{Job, JobStatus, ProcessingState};
use classfeed_core::Language;
use colored::*;
use std::io::Write;

const BAR_WIDTH: usize = 30;

fn bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f64).round()) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Redraw the single workflow progress line
pub fn print_progress(snapshot: &WorkflowSnapshot) {
    let detail = snapshot
        .status
        .as_ref()
        .and_then(|s| s.current_task.clone())
        .unwrap_or_default();

    eprint!(
        "\r\x1b[2K{} {:>3.0}%  {}  {}",
        bar(snapshot.progress).cyan(),
        snapshot.progress * 100.0,
        colorize_state(&snapshot.state),
        detail.dimmed()
    );
    let _ = std::io::stderr().flush();
}

/// End the progress line
pub fn finish_progress() {
    eprintln!();
}

/// One line per observed status while watching a job
pub fn print_status_line(status: &JobStatus) {
    let eta = status
        .estimated_remaining()
        .map(|d| format!("~{}s left", d.as_secs()))
        .unwrap_or_default();

    println!(
        "{} {} {:>3.0}% {} {}",
        status.updated_at.format("%H:%M:%S").to_string().dimmed(),
        colorize_status(status.status),
        status.clamped_progress() * 100.0,
        status.current_task.as_deref().unwrap_or_default(),
        eta.dimmed()
    );
}

/// Print detailed status information
pub fn print_status(status: &JobStatus) {
    println!("{}", "Job Status:".bold());
    println!("  ID:        {}", status.id.to_string().cyan());
    println!("  Status:    {}", colorize_status(status.status));
    println!("  Progress:  {:.0}%", status.clamped_progress() * 100.0);
    if let Some(task) = &status.current_task {
        println!("  Task:      {}", task);
    }
    if let Some(eta) = status.estimated_remaining() {
        println!("  Remaining: ~{}s", eta.as_secs());
    }
    println!(
        "  Created:   {}",
        status.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    println!(
        "  Updated:   {}",
        status.updated_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    if let Some(error) = &status.error_message {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// Print the job created by a submission
pub fn print_job(job: &Job) {
    println!("{}", "Submission:".bold());
    println!("  Job ID:   {}", job.id.to_string().cyan());
    println!("  File:     {}", job.video_filename);
    println!("  Subject:  {}", job.subject);
    println!("  Theme:    {}", job.theme);
    println!("  Language: {}", language_name(&job.language));
    println!();
}

/// Print the selected feedback entry, flagging a language fallback
pub fn print_feedback(result: &FeedbackResult, selection: Option<&FeedbackSelection>) {
    let Some(selection) = selection else {
        println!("{}", "No feedback was generated for this video.".yellow());
        return;
    };
    let Some(feedback) = result.selected(selection) else {
        return;
    };

    if let LanguageMatch::Fallback { requested, shown } = &selection.language_match {
        println!(
            "{}",
            format!(
                "⚠ Feedback in {} is unavailable, showing {} instead",
                language_name(requested),
                language_name(shown)
            )
            .yellow()
        );
        println!();
    }

    println!(
        "{}",
        format!("Feedback ({})", language_name(&feedback.language)).bold()
    );
    println!("  Teaching quality:    {}", score(feedback.teaching_quality_score));
    println!("  Student engagement:  {}", score(feedback.student_engagement_score));
    println!("  Overall:             {}", score(feedback.overall_score));

    println!("\n{}", "Strengths:".bold());
    println!("{}", feedback.strengths);
    println!("\n{}", "Areas for improvement:".bold());
    println!("{}", feedback.areas_for_improvement);
    println!("\n{}", "Recommendations:".bold());
    println!("{}", feedback.specific_recommendations);

    if !result.transcription().is_empty() {
        println!("\n{}", "Transcription:".bold());
        println!("{}", result.transcription().dimmed());
    }
}

/// Advice shown next to the error message
pub fn print_failure_advice(err: &ClientError) {
    let advice = match err.kind() {
        ErrorKind::Validation => "Check the file and form fields, then try again.",
        ErrorKind::Transport => "Is the analysis service running and reachable?",
        ErrorKind::Processing => "The service could not analyse this video. Try another recording.",
        ErrorKind::Cancelled => "Processing continues on the server; use `classfeed watch <ID>` to resume.",
        ErrorKind::TimedOut => "Processing is taking longer than expected; use `classfeed watch <ID>` later.",
        ErrorKind::Remote | ErrorKind::Internal => "Please try again later.",
    };
    eprintln!("{}", advice.yellow());
}

fn score(value: Option<f64>) -> ColoredString {
    let Some(value) = value else {
        return "n/a".dimmed();
    };
    let text = format!("{:.1}/10", value);
    if value >= 7.5 {
        text.green()
    } else if value >= 5.0 {
        text.yellow()
    } else {
        text.red()
    }
}

fn language_name(code: &str) -> String {
    Language::from_code(code)
        .map(|lang| lang.label().to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Colorize a processing status for display
fn colorize_status(status: ProcessingState) -> ColoredString {
    let text = status.as_str();
    match status {
        ProcessingState::Pending => text.yellow(),
        ProcessingState::Processing => text.cyan(),
        ProcessingState::Completed => text.green(),
        ProcessingState::Failed => text.red(),
    }
}

fn colorize_state(state: &SubmissionState) -> ColoredString {
    let text = state.label();
    match state {
        SubmissionState::Idle => text.dimmed(),
        SubmissionState::Submitting | SubmissionState::Polling { .. } => text.cyan(),
        SubmissionState::Retrieving { .. } => text.blue(),
        SubmissionState::Complete { .. } => text.green(),
        SubmissionState::Failed { .. } => text.red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width() {
        assert_eq!(bar(0.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(0.6).chars().filter(|c| *c == '█').count(), 18);
        assert_eq!(bar(1.5).chars().filter(|c| *c == '░').count(), 0);
    }

    #[test]
    fn test_missing_score_prints_na() {
        assert_eq!(&*score(None), "n/a");
        assert_eq!(&*score(Some(7.5)), "7.5/10");
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("tj"), "tajik");
        assert_eq!(language_name("de"), "de");
    }
}
