//! Toast notification routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use crate::services::toast::{Toast, ToastRequest};
use crate::state::AppState;

/// `GET /api/toasts`: toasts that have not timed out.
pub async fn list_toasts(State(state): State<AppState>) -> Json<Vec<Toast>> {
    Json(state.toasts.active())
}

/// `POST /api/toasts`: show a toast.
pub async fn show_toast(State(state): State<AppState>, Json(request): Json<ToastRequest>) -> Json<Toast> {
    Json(state.toasts.show(request))
}

/// `DELETE /api/toasts/{id}`: dismiss early.
pub async fn dismiss_toast(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.toasts.dismiss(id) { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}
