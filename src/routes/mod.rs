//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API the dashboard front end renders from. Every page
//! (dashboard, transcripts, session videos, emotion distribution,
//! engagement timeline) reads from here; configuration and recording
//! controls write through here. CORS is open so a separately served front
//! end can call it from the browser.

pub mod config;
pub mod dashboard;
pub mod health;
pub mod pages;
pub mod recording;
pub mod toasts;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/config",
            get(config::get_config)
                .patch(config::update_config)
                .delete(config::reset_config),
        )
        .route("/api/config/save", post(config::save_config))
        .route("/api/config/options", get(config::config_options))
        .route("/api/kpis/realtime", get(dashboard::realtime_kpis))
        .route("/api/kpis/refresh", post(dashboard::refresh_kpis))
        .route("/api/dashboard", get(dashboard::dashboard))
        .route("/api/transcripts", get(pages::list_transcripts))
        .route("/api/transcripts/subjects", get(pages::transcript_subjects))
        .route("/api/transcripts/{id}/download", post(pages::download_transcript))
        .route("/api/session-videos", get(pages::session_videos))
        .route("/api/emotion-distribution", get(pages::emotion_distribution))
        .route("/api/engagement-timeline", get(pages::engagement_timeline))
        .route("/api/system-health", get(health::system_health))
        .route("/api/system-health/refresh", post(health::refresh_system_health))
        .route("/api/recording", get(recording::recording_status))
        .route("/api/recording/start", post(recording::start_recording))
        .route("/api/recording/stop", post(recording::stop_recording))
        .route("/api/toasts", get(toasts::list_toasts).post(toasts::show_toast))
        .route("/api/toasts/{id}", delete(toasts::dismiss_toast))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
