//! Teacher configuration routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;
use tracing::error;

use crate::services::toast::{Toast, ToastKind, ToastRequest};
use crate::state::AppState;
use crate::store::StoreError;
use crate::teacher_config::{ANIMATION_STYLES, SUBJECTS, TeacherConfig, TeacherConfigPatch, VIDEO_QUALITIES};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptions {
    pub subjects: &'static [&'static str],
    pub video_qualities: &'static [&'static str],
    pub animation_styles: &'static [&'static str],
}

/// `GET /api/config`: current teacher configuration.
pub async fn get_config(State(state): State<AppState>) -> Json<TeacherConfig> {
    Json(state.config.config().await)
}

/// `PATCH /api/config`: merge a partial update.
pub async fn update_config(
    State(state): State<AppState>,
    Json(patch): Json<TeacherConfigPatch>,
) -> Result<Json<TeacherConfig>, StatusCode> {
    let config = state
        .config
        .update_config(patch)
        .await
        .map_err(store_error_to_status)?;
    Ok(Json(config))
}

/// `DELETE /api/config`: restore the defaults.
pub async fn reset_config(State(state): State<AppState>) -> Result<Json<TeacherConfig>, StatusCode> {
    let config = state.config.reset_config().await.map_err(store_error_to_status)?;
    state.activity.record("Configuration reset to defaults");
    Ok(Json(config))
}

/// `POST /api/config/save`: changes persist on write; this only confirms it.
pub async fn save_config(State(state): State<AppState>) -> Json<Toast> {
    Json(state.toasts.show(ToastRequest::new(
        ToastKind::Success,
        "Configuration Saved",
        "Your settings have been saved successfully.",
    )))
}

/// `GET /api/config/options`: choices offered by the configuration panel.
pub async fn config_options() -> Json<ConfigOptions> {
    Json(ConfigOptions { subjects: SUBJECTS, video_qualities: VIDEO_QUALITIES, animation_styles: ANIMATION_STYLES })
}

pub(crate) fn store_error_to_status(err: StoreError) -> StatusCode {
    error!(error = %err, "config persist failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
