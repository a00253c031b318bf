//! Recording start/stop routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::clients::recording::RecordingError;
use crate::services::recording::RecordingStatus;
use crate::state::AppState;

#[derive(Deserialize, Default)]
pub struct StartRecordingBody {
    pub session_id: Option<String>,
}

/// `GET /api/recording`: whether a session is live and the last artifacts.
pub async fn recording_status(State(state): State<AppState>) -> Json<RecordingStatus> {
    Json(state.recording.status().await)
}

/// `POST /api/recording/start`: body `{ "session_id"?: string }`; empty body allowed.
pub async fn start_recording(
    State(state): State<AppState>,
    body: Option<Json<StartRecordingBody>>,
) -> Result<Json<RecordingStatus>, StatusCode> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let status = state
        .recording
        .start(body.session_id)
        .await
        .map_err(recording_error_to_status)?;
    Ok(Json(status))
}

/// `POST /api/recording/stop`: stop the live session.
pub async fn stop_recording(State(state): State<AppState>) -> Result<Json<RecordingStatus>, StatusCode> {
    let status = state.recording.stop().await.map_err(recording_error_to_status)?;
    Ok(Json(status))
}

pub(crate) fn recording_error_to_status(err: RecordingError) -> StatusCode {
    match err {
        RecordingError::NotActive | RecordingError::AlreadyActive(_) => StatusCode::CONFLICT,
        RecordingError::Request(_) | RecordingError::Status { .. } | RecordingError::Parse(_) => {
            StatusCode::BAD_GATEWAY
        }
        RecordingError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "recording_test.rs"]
mod tests;
