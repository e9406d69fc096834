use axum::{extract::Path, Json};
use contracts::domain::a008_production_order::aggregate::{ProductionOrder, ProductionOrderDto};

use crate::domain::a008_production_order;
use crate::shared::error::ApiResult;

/// GET /api/produccion/ordenes
pub async fn list_all() -> ApiResult<Json<Vec<ProductionOrder>>> {
    Ok(Json(a008_production_order::service::list_all().await?))
}

/// POST /api/produccion/ordenes
pub async fn create(Json(dto): Json<ProductionOrderDto>) -> ApiResult<Json<ProductionOrder>> {
    Ok(Json(a008_production_order::service::create(dto).await?))
}

/// PUT /api/produccion/ordenes/:id/terminar
pub async fn finish(Path(id): Path<i64>) -> ApiResult<Json<ProductionOrder>> {
    Ok(Json(a008_production_order::service::finish(id).await?))
}
