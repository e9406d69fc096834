use axum::Json;
use contracts::usecases::u502_inventory_analysis::dto::InventoryAnalysisResponse;

use crate::shared::error::ApiResult;
use crate::usecases::u502_inventory_analysis::service;

/// GET /api/ia/analisis
pub async fn get_analysis() -> ApiResult<Json<InventoryAnalysisResponse>> {
    Ok(Json(service::run_analysis().await?))
}
