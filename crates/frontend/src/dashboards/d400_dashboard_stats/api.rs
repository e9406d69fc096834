use contracts::dashboards::d400_dashboard_stats::dto::DashboardStats;

use crate::shared::api_utils::get_json;

pub async fn get_stats() -> Result<DashboardStats, String> {
    get_json("/api/dashboard/stats").await
}
