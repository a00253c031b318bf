//! Recording backend client: start/stop a session recording and collect the
//! generated video and transcript URLs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{BodyError, read_body};

#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    /// Stop was requested with no live session.
    #[error("no recording session is active")]
    NotActive,

    /// Start was requested while a session is already live.
    #[error("recording session {0} is already active")]
    AlreadyActive(String),

    /// The HTTP request to the recording backend failed.
    #[error("recording request failed: {0}")]
    Request(String),

    /// The recording backend returned a non-success status.
    #[error("recording backend responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("recording response parse failed: {0}")]
    Parse(String),

    /// Local state could not be persisted.
    #[error("recording state persist failed: {0}")]
    Persist(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingAction {
    Start,
    Stop,
}

impl RecordingAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

/// Artifacts produced by a finished recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingResult {
    pub video_url: String,
    pub transcript_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StopResponse {
    #[serde(default, alias = "video_url")]
    video_url: Option<String>,
    #[serde(default, alias = "transcript_url")]
    transcript_url: Option<String>,
}

#[derive(Serialize)]
struct SessionBody<'a> {
    session_id: &'a str,
}

#[async_trait::async_trait]
pub trait RecordingBackend: Send + Sync {
    /// Ask the backend to begin recording `session_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordingError`] if the backend is unreachable or refuses.
    async fn start(&self, session_id: &str) -> Result<(), RecordingError>;

    /// Ask the backend to stop recording. `Ok(None)` means the backend
    /// accepted the stop but did not report both artifact URLs.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordingError`] if the backend is unreachable or refuses.
    async fn stop(&self, session_id: &str) -> Result<Option<RecordingResult>, RecordingError>;

    /// Whether the backend answers its health probe.
    async fn health(&self) -> bool;
}

pub struct HttpRecordingBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRecordingBackend {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    async fn post_action(&self, action: RecordingAction, session_id: &str) -> Result<String, RecordingError> {
        let url = format!("{}/recording/{}", self.base_url, action.as_str());
        let response = self
            .http
            .post(url)
            .json(&SessionBody { session_id })
            .send()
            .await
            .map_err(|e| RecordingError::Request(e.to_string()))?;

        read_body(response).await.map_err(|e| match e {
            BodyError::Read(msg) => RecordingError::Request(msg),
            BodyError::Status { status, body } => RecordingError::Status { status, body },
        })
    }
}

#[async_trait::async_trait]
impl RecordingBackend for HttpRecordingBackend {
    async fn start(&self, session_id: &str) -> Result<(), RecordingError> {
        self.post_action(RecordingAction::Start, session_id).await?;
        Ok(())
    }

    async fn stop(&self, session_id: &str) -> Result<Option<RecordingResult>, RecordingError> {
        let text = self.post_action(RecordingAction::Stop, session_id).await?;
        parse_stop_response(&text)
    }

    async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Decode a stop reply. Both URLs must be present and non-empty to yield a
/// result; otherwise the reply is logged and treated as having no artifacts.
pub(crate) fn parse_stop_response(text: &str) -> Result<Option<RecordingResult>, RecordingError> {
    let parsed: StopResponse = serde_json::from_str(text).map_err(|e| RecordingError::Parse(e.to_string()))?;
    match (parsed.video_url, parsed.transcript_url) {
        (Some(video_url), Some(transcript_url)) if !video_url.is_empty() && !transcript_url.is_empty() => {
            Ok(Some(RecordingResult { video_url, transcript_url }))
        }
        _ => {
            warn!(body = %text, "stop response is missing videoUrl or transcriptUrl");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "recording_test.rs"]
mod tests;
