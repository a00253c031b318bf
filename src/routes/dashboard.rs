//! Dashboard and real-time KPI routes.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::catalog::{ChartPoint, SessionVideoCard, Transcript};
use crate::kpi::Kpi;
use crate::services::kpi_monitor::KpiState;
use crate::state::AppState;

/// Shown on the attendance/engagement cards until the first poll lands.
const FALLBACK_ATTENDANCE_PERCENT: f64 = 93.3;
const FALLBACK_ENGAGEMENT_PERCENT: f64 = 82.6;

#[derive(Serialize)]
pub struct DashboardKpis {
    pub attendance: Kpi,
    pub engagement: Kpi,
    pub sessions: CountKpi,
    pub transcripts: CountKpi,
}

#[derive(Serialize)]
pub struct CountKpi {
    pub value: String,
    pub delta: i64,
}

#[derive(Serialize)]
pub struct DashboardCharts {
    pub engagement: Vec<ChartPoint>,
    pub emotions: Vec<ChartPoint>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub kpis: DashboardKpis,
    /// `false` while KPIs come from fallback values.
    pub live: bool,
    pub video_session: Option<SessionVideoCard>,
    pub charts: DashboardCharts,
    pub transcripts: Vec<Transcript>,
}

/// `GET /api/kpis/realtime`: latest polled KPIs with loading/error flags.
pub async fn realtime_kpis(State(state): State<AppState>) -> Json<KpiState> {
    Json(state.kpis.snapshot().await)
}

/// `POST /api/kpis/refresh`: poll now instead of waiting for the next tick.
pub async fn refresh_kpis(State(state): State<AppState>) -> Json<KpiState> {
    Json(state.kpis.refresh().await)
}

/// `GET /api/dashboard`: everything the main dashboard grid renders.
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    Json(build_dashboard(&state).await)
}

pub(crate) async fn build_dashboard(state: &AppState) -> DashboardResponse {
    let polled = state.kpis.snapshot().await.kpis;
    let live = polled.is_some();
    let (attendance, engagement) = match polled {
        Some(k) => (k.attendance, k.engagement),
        None => (
            Kpi::new(FALLBACK_ATTENDANCE_PERCENT, None),
            Kpi::new(FALLBACK_ENGAGEMENT_PERCENT, None),
        ),
    };

    let catalog = &state.catalog;
    DashboardResponse {
        kpis: DashboardKpis {
            attendance,
            engagement,
            sessions: count_kpi(catalog.session_count()),
            transcripts: count_kpi(catalog.transcript_count()),
        },
        live,
        video_session: catalog.latest_session(),
        charts: DashboardCharts { engagement: catalog.engagement_chart(), emotions: catalog.emotion_chart() },
        transcripts: catalog.transcripts(None),
    }
}

fn count_kpi(n: usize) -> CountKpi {
    CountKpi { value: n.to_string(), delta: 0 }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
