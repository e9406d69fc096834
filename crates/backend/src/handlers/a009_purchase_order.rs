use axum::{extract::Path, Json};
use contracts::domain::a009_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseStatusUpdate,
};

use crate::domain::a009_purchase_order;
use crate::shared::error::ApiResult;

/// GET /api/compras
pub async fn list_all() -> ApiResult<Json<Vec<PurchaseOrder>>> {
    Ok(Json(a009_purchase_order::service::list_all().await?))
}

/// POST /api/compras
pub async fn create(Json(dto): Json<PurchaseOrderDto>) -> ApiResult<Json<PurchaseOrder>> {
    Ok(Json(a009_purchase_order::service::create(dto).await?))
}

/// PUT /api/compras/:id/estado
pub async fn update_status(
    Path(id): Path<i64>,
    Json(update): Json<PurchaseStatusUpdate>,
) -> ApiResult<Json<PurchaseOrder>> {
    Ok(Json(
        a009_purchase_order::service::update_status(id, update).await?,
    ))
}

/// PUT /api/compras/:id/recibir
pub async fn receive(Path(id): Path<i64>) -> ApiResult<Json<PurchaseOrder>> {
    Ok(Json(a009_purchase_order::service::receive(id).await?))
}
