//! Read-only page routes: transcripts, session videos, emotion distribution,
//! engagement timeline.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::catalog::{EmotionDistribution, EngagementTimeline, SessionVideoCard, Transcript};
use crate::services::toast::{Toast, ToastKind, ToastRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TranscriptQuery {
    pub subject: Option<String>,
}

#[derive(Serialize)]
pub struct DownloadResponse {
    pub url: String,
    pub toast: Toast,
}

/// `GET /api/transcripts?subject=`: transcripts, optionally for one subject.
pub async fn list_transcripts(
    State(state): State<AppState>,
    Query(query): Query<TranscriptQuery>,
) -> Json<Vec<Transcript>> {
    Json(state.catalog.transcripts(query.subject.as_deref()))
}

/// `GET /api/transcripts/subjects`: subject filter options, `"All"` first.
pub async fn transcript_subjects(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.transcript_subjects())
}

/// `POST /api/transcripts/{id}/download`: resolve the file URL and announce it.
pub async fn download_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DownloadResponse>, StatusCode> {
    let transcript = state.catalog.transcript(&id).ok_or(StatusCode::NOT_FOUND)?;
    let toast = state.toasts.show(ToastRequest::new(
        ToastKind::Success,
        "Download Started",
        format!("{} is being downloaded...", transcript.name),
    ));
    Ok(Json(DownloadResponse { url: transcript.url.clone(), toast }))
}

/// `GET /api/session-videos`: recorded sessions, newest first.
pub async fn session_videos(State(state): State<AppState>) -> Json<Vec<SessionVideoCard>> {
    Json(state.catalog.session_videos())
}

/// `GET /api/emotion-distribution`
pub async fn emotion_distribution(State(state): State<AppState>) -> Json<EmotionDistribution> {
    Json(state.catalog.emotion_distribution())
}

/// `GET /api/engagement-timeline`
pub async fn engagement_timeline(State(state): State<AppState>) -> Json<EngagementTimeline> {
    Json(state.catalog.engagement_timeline())
}
