//! Exercises the reqwest transport against a throwaway axum server.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use classfeed_client::{ClientConfig, ClientError, ErrorKind, FeedbackClient, SubmissionWorkflow};
use classfeed_core::domain::job::ProcessingState;
use classfeed_core::domain::submission::{SubmissionInput, VideoAsset};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn input() -> SubmissionInput {
    SubmissionInput {
        video: VideoAsset::new("lesson.mp4", vec![1u8; 32]),
        subject: "physics".to_string(),
        theme: "Optics".to_string(),
        source_language: "russian".to_string(),
        target_language: "tajik".to_string(),
    }
}

/// Echoes the multipart fields back inside an upload response
async fn echo_upload(mut multipart: Multipart) -> Json<Value> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.unwrap().len();
            fields.insert(name, format!("{}|{}|{}", file_name, content_type, len));
        } else {
            fields.insert(name, field.text().await.unwrap());
        }
    }

    Json(json!({
        "id": 11,
        "video_filename": fields["file"],
        "subject": fields["subject"],
        "theme": fields["theme"],
        "language": fields["language"],
        "status": "pending",
        "created_at": "2025-03-01T10:00:00.500000",
        "message": fields["feedback_language"],
    }))
}

fn status_body(id: i64, status: &str, progress: f64) -> Value {
    json!({
        "id": id,
        "status": status,
        "progress": progress,
        "current_task": null,
        "estimated_time_remaining": null,
        "error_message": null,
        "created_at": "2025-03-01T10:00:00",
        "updated_at": "2025-03-01T10:00:02",
    })
}

fn feedback_body(id: i64) -> Value {
    let entry = |language: &str| {
        json!({
            "language": language,
            "teaching_quality_score": 8.0,
            "student_engagement_score": 7.0,
            "overall_score": 7.5,
            "strengths": "Clear explanations",
            "areas_for_improvement": "Pacing",
            "specific_recommendations": "Use more examples",
            "technical_analysis": { "camera_stability_score": 9.1 },
        })
    };
    json!({
        "video_id": id,
        "status": "completed",
        "transcription": "Today we talk about light.",
        "feedbacks": [entry("ru"), entry("tj")],
    })
}

#[tokio::test]
async fn upload_sends_backend_codes_and_file() {
    let base = spawn_server(Router::new().route("/upload-video", post(echo_upload))).await;

    let job = FeedbackClient::new(base).upload_video(&input()).await.unwrap();

    assert_eq!(job.id, 11);
    assert_eq!(job.video_filename, "lesson.mp4|video/mp4|32");
    assert_eq!(job.subject, "physics");
    assert_eq!(job.theme, "Optics");
    assert_eq!(job.language, "ru");
    assert_eq!(job.message, "tj");
    assert_eq!(job.status, ProcessingState::Pending);
}

#[tokio::test]
async fn upload_422_becomes_validation_error() {
    let app = Router::new().route(
        "/upload-video",
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": [{ "loc": ["body", "subject"], "msg": "required" }] })),
            )
        }),
    );
    let base = spawn_server(app).await;

    let err = FeedbackClient::new(base).upload_video(&input()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Validation errors: body.subject: required");
}

#[tokio::test]
async fn upload_rejection_uses_detail() {
    let app = Router::new().route(
        "/upload-video",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Invalid file type: .mkv" })),
            )
        }),
    );
    let base = spawn_server(app).await;

    let err = FeedbackClient::new(base).upload_video(&input()).await.unwrap_err();

    assert_eq!(
        err,
        ClientError::Remote {
            status: 400,
            message: "Invalid file type: .mkv".to_string(),
        }
    );
}

#[tokio::test]
async fn status_not_found() {
    let app = Router::new().route(
        "/status/{id}",
        get(|Path(id): Path<i64>| async move {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Not found", "detail": format!("Video ID {} not found", id) })),
            )
        }),
    );
    let base = spawn_server(app).await;

    let err = FeedbackClient::new(base).get_status(5).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Video ID 5 not found");
}

#[tokio::test]
async fn feedback_error_without_body_uses_fallback() {
    let app = Router::new().route(
        "/get-feedback/{id}",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let base = spawn_server(app).await;

    let err = FeedbackClient::new(base).get_feedback(1).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to get feedback");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn malformed_success_body_is_transport_error() {
    let app = Router::new().route("/status/{id}", get(|| async { "definitely not json" }));
    let base = spawn_server(app).await;

    let err = FeedbackClient::new(base).get_status(1).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = FeedbackClient::new(format!("http://{}", addr))
        .get_status(1)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn workflow_end_to_end() -> anyhow::Result<()> {
    let polls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/upload-video", post(echo_upload))
        .route(
            "/status/{id}",
            get(
                |State(polls): State<Arc<AtomicUsize>>, Path(id): Path<i64>| async move {
                    let body = match polls.fetch_add(1, Ordering::SeqCst) {
                        0 => status_body(id, "pending", 0.0),
                        1 => status_body(id, "processing", 0.5),
                        _ => status_body(id, "completed", 1.0),
                    };
                    Json(body).into_response()
                },
            ),
        )
        .route(
            "/get-feedback/{id}",
            get(|Path(id): Path<i64>| async move { Json(feedback_body(id)) }),
        )
        .with_state(polls.clone());
    let base = spawn_server(app).await;

    let config = ClientConfig::new(base).with_poll_interval(Duration::from_millis(10));
    let client = Arc::new(FeedbackClient::from_config(&config)?);
    let mut input = input();
    input.target_language = "english".to_string();

    let outcome = SubmissionWorkflow::new(client, &config).run(&input).await?;

    assert_eq!(outcome.job.id, 11);
    assert_eq!(polls.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.result.transcription(), "Today we talk about light.");
    assert!(outcome.is_language_fallback());
    assert_eq!(outcome.presented().map(|f| f.language.as_str()), Some("ru"));
    Ok(())
}
