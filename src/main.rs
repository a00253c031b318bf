mod catalog;
mod clients;
mod kpi;
mod routes;
mod services;
mod settings;
mod state;
mod store;
mod teacher_config;

use std::sync::Arc;

use clients::analytics::{HttpRealtimeSource, MockRealtimeSource, RealtimeSource};
use clients::recording::HttpRecordingBackend;
use services::health::SysinfoMetrics;
use settings::{AnalyticsSourceKind, Settings};
use store::LocalStore;
use teacher_config::ConfigService;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env().expect("invalid settings");
    let store = LocalStore::open(&settings.store_path).expect("store init failed");
    let config = ConfigService::load(store.clone());
    let http = clients::build_http_client(settings.http_timeouts).expect("http client init failed");

    let source: Arc<dyn RealtimeSource> = match settings.analytics_source {
        AnalyticsSourceKind::Http => {
            tracing::info!(url = %settings.analytics_url, "using analytics backend");
            Arc::new(HttpRealtimeSource::new(http.clone(), settings.analytics_url.clone()))
        }
        AnalyticsSourceKind::Mock => {
            tracing::warn!("analytics backend disabled; serving generated detections");
            Arc::new(MockRealtimeSource::new(config.subscribe()))
        }
    };
    let recorder = Arc::new(HttpRecordingBackend::new(http, settings.recording_url.clone()));

    let state = state::AppState::new(&settings, store, config, source, recorder, Arc::new(SysinfoMetrics::new()));

    // Spawn background pollers.
    let kpi_poller = state.kpis.spawn(settings.kpi_poll_interval);
    let health_poller = state.health.spawn(settings.health_poll_interval);

    let app = routes::app(state);
    let port = settings.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "classroom dashboard listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown requested");
        })
        .await
        .expect("server failed");

    kpi_poller.abort();
    health_poller.abort();
}
