use axum::{extract::Path, Json};
use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierDto};
use serde_json::{json, Value};

use crate::domain::a001_supplier;
use crate::shared::error::ApiResult;

/// GET /api/productos/proveedores
pub async fn list_all() -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(a001_supplier::service::list_all().await?))
}

/// POST /api/productos/proveedores
pub async fn create(Json(dto): Json<SupplierDto>) -> ApiResult<Json<Supplier>> {
    Ok(Json(a001_supplier::service::create(dto).await?))
}

/// PUT /api/productos/proveedores/:id
pub async fn update(Path(id): Path<i64>, Json(dto): Json<SupplierDto>) -> ApiResult<Json<Supplier>> {
    Ok(Json(a001_supplier::service::update(id, dto).await?))
}

/// DELETE /api/productos/proveedores/:id
pub async fn delete(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    a001_supplier::service::delete(id).await?;
    Ok(Json(json!({ "ok": true })))
}
