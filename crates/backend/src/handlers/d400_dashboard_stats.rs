use axum::Json;
use contracts::dashboards::d400_dashboard_stats::dto::DashboardStats;

use crate::dashboards::d400_dashboard_stats::service;
use crate::shared::error::ApiResult;

/// GET /api/dashboard/stats
pub async fn get_stats() -> ApiResult<Json<DashboardStats>> {
    Ok(Json(service::get_stats().await?))
}
