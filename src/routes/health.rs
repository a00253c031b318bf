//! System health routes.

use axum::extract::State;
use axum::response::Json;

use crate::services::health::HealthState;
use crate::services::toast::{ToastKind, ToastRequest};
use crate::state::AppState;

/// `GET /api/system-health`: last sampled health.
pub async fn system_health(State(state): State<AppState>) -> Json<HealthState> {
    Json(state.health.snapshot().await)
}

/// `POST /api/system-health/refresh`: sample now.
pub async fn refresh_system_health(State(state): State<AppState>) -> Json<HealthState> {
    state.toasts.show(ToastRequest::new(
        ToastKind::Info,
        "Refreshing",
        "System health data is being updated...",
    ));
    Json(state.health.refresh().await)
}
