use axum::Json;
use serde::Deserialize;

use crate::dashboard::selection::{Dashboard, DashboardView, Tab};
use crate::models::career::RecommendationResponse;

#[derive(Deserialize)]
pub struct DashboardRequest {
    pub recommendations: RecommendationResponse,
    #[serde(default)]
    pub selected_id: Option<String>,
    #[serde(default)]
    pub tab: Option<Tab>,
}

/// POST /api/v1/dashboard
/// Unknown or missing ids fall back to the first career.
pub async fn handle_dashboard(Json(req): Json<DashboardRequest>) -> Json<DashboardView> {
    let mut dashboard = Dashboard::new(&req.recommendations);
    if let Some(id) = req.selected_id.as_deref() {
        dashboard.select(id);
    }
    if let Some(tab) = req.tab {
        dashboard.set_tab(tab);
    }
    Json(dashboard.view(&req.recommendations))
}
