use contracts::usecases::u502_inventory_analysis::dto::InventoryAnalysisResponse;

use crate::shared::api_utils::get_json;

/// Rule-based analysis over the last 30 days of sales.
pub async fn fetch_analysis() -> Result<InventoryAnalysisResponse, String> {
    get_json("/api/ia/analisis").await
}
