use axum::{extract::Path, Json};
use contracts::domain::a007_bill_of_materials::aggregate::{BomItem, BomItemDto};
use serde_json::{json, Value};

use crate::domain::a007_bill_of_materials;
use crate::shared::error::ApiResult;

/// GET /api/produccion/bom
pub async fn list_all() -> ApiResult<Json<Vec<BomItem>>> {
    Ok(Json(a007_bill_of_materials::service::list_all().await?))
}

/// GET /api/produccion/bom/:producto_id
pub async fn list_by_product(Path(product_id): Path<i64>) -> ApiResult<Json<Vec<BomItem>>> {
    Ok(Json(
        a007_bill_of_materials::service::list_by_product(product_id).await?,
    ))
}

/// POST /api/produccion/bom
pub async fn create(Json(dto): Json<BomItemDto>) -> ApiResult<Json<BomItem>> {
    Ok(Json(a007_bill_of_materials::service::create(dto).await?))
}

/// DELETE /api/produccion/bom/:id
pub async fn delete(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    a007_bill_of_materials::service::delete(id).await?;
    Ok(Json(json!({ "ok": true })))
}
