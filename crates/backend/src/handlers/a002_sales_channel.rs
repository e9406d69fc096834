use axum::{extract::Path, Json};
use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelDto};
use serde_json::{json, Value};

use crate::domain::a002_sales_channel;
use crate::shared::error::ApiResult;

/// GET /api/ventas/canales
pub async fn list_all() -> ApiResult<Json<Vec<SalesChannel>>> {
    Ok(Json(a002_sales_channel::service::list_all().await?))
}

/// POST /api/ventas/canales
pub async fn create(Json(dto): Json<SalesChannelDto>) -> ApiResult<Json<SalesChannel>> {
    Ok(Json(a002_sales_channel::service::create(dto).await?))
}

/// PUT /api/ventas/canales/:id
pub async fn update(
    Path(id): Path<i64>,
    Json(dto): Json<SalesChannelDto>,
) -> ApiResult<Json<SalesChannel>> {
    Ok(Json(a002_sales_channel::service::update(id, dto).await?))
}

/// DELETE /api/ventas/canales/:id
pub async fn delete(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    a002_sales_channel::service::delete(id).await?;
    Ok(Json(json!({ "ok": true })))
}
