//! Real-time classroom snapshot sources.

use rand::Rng;
use tokio::sync::watch;

use super::{BodyError, read_body};
use crate::kpi::{EngagementStatus, RealtimeSnapshot, StudentDetection, TrackId};
use crate::teacher_config::TeacherConfig;

pub const REALTIME_PATH: &str = "/api/classroom/realtime";

const MOCK_EMOTIONS: &[&str] = &["happy", "neutral", "surprise", "sad", "fear", "angry"];

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP request to the analytics backend failed.
    #[error("analytics request failed: {0}")]
    Request(String),

    /// The analytics backend returned a non-success status.
    #[error("analytics responded with status {status}")]
    Status { status: u16, body: String },

    /// The response body is not a realtime snapshot.
    #[error("analytics response parse failed: {0}")]
    Parse(String),
}

/// Anything that can produce a classroom snapshot for a subject.
#[async_trait::async_trait]
pub trait RealtimeSource: Send + Sync {
    /// Fetch the latest snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the backend is unreachable or replies
    /// with something other than a snapshot.
    async fn fetch(&self, subject: &str) -> Result<RealtimeSnapshot, SourceError>;
}

// =============================================================================
// HTTP
// =============================================================================

pub struct HttpRealtimeSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpRealtimeSource {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }
}

#[async_trait::async_trait]
impl RealtimeSource for HttpRealtimeSource {
    async fn fetch(&self, subject: &str) -> Result<RealtimeSnapshot, SourceError> {
        let url = format!("{}{REALTIME_PATH}", self.base_url);
        let response = self
            .http
            .get(url)
            .query(&[("subject", subject)])
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        let text = read_body(response).await.map_err(|e| match e {
            BodyError::Read(msg) => SourceError::Request(msg),
            BodyError::Status { status, body } => SourceError::Status { status, body },
        })?;
        parse_snapshot(&text)
    }
}

pub(crate) fn parse_snapshot(text: &str) -> Result<RealtimeSnapshot, SourceError> {
    serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))
}

// =============================================================================
// MOCK
// =============================================================================

/// Generates plausible snapshots for the configured class so the dashboard
/// can run without the vision backend. The class size is read from the live
/// config on every snapshot.
pub struct MockRealtimeSource {
    config: watch::Receiver<TeacherConfig>,
}

impl MockRealtimeSource {
    #[must_use]
    pub fn new(config: watch::Receiver<TeacherConfig>) -> Self {
        Self { config }
    }

    /// Build one snapshot from the given RNG.
    pub fn generate(&self, rng: &mut impl Rng) -> RealtimeSnapshot {
        let class_size = self.config.borrow().total_students;
        if class_size == 0 {
            return RealtimeSnapshot::default();
        }
        let low = (class_size * 3 / 4).max(1);
        let present = rng.random_range(low..=class_size);
        let in_frame = rng.random_range(present.saturating_sub(3).max(1)..=present);

        let present_ids = (1..=present).map(|n| TrackId(n.to_string())).collect();
        let engagement = (1..=in_frame)
            .map(|n| {
                let emotion = MOCK_EMOTIONS[rng.random_range(0..MOCK_EMOTIONS.len())];
                let engagement = if rng.random_bool(0.8) {
                    EngagementStatus::Engaged
                } else if rng.random_bool(0.5) {
                    EngagementStatus::Disengaged
                } else {
                    EngagementStatus::Unknown
                };
                StudentDetection { id: TrackId(n.to_string()), emotion: emotion.to_string(), engagement }
            })
            .collect();

        RealtimeSnapshot { present_ids, engagement }
    }
}

#[async_trait::async_trait]
impl RealtimeSource for MockRealtimeSource {
    async fn fetch(&self, _subject: &str) -> Result<RealtimeSnapshot, SourceError> {
        Ok(self.generate(&mut rand::rng()))
    }
}

#[cfg(test)]
#[path = "analytics_test.rs"]
mod tests;
