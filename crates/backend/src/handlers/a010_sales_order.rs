use axum::{extract::Path, Json};
use contracts::domain::a010_sales_order::aggregate::{SalesOrder, SalesOrderDto, SalesStatusUpdate};
use serde_json::{json, Value};

use crate::domain::a010_sales_order;
use crate::shared::error::ApiResult;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/ventas
pub async fn list_all() -> ApiResult<Json<Vec<SalesOrder>>> {
    Ok(Json(a010_sales_order::service::list_all().await?))
}

/// POST /api/ventas
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<SalesOrderDto>,
) -> ApiResult<Json<SalesOrder>> {
    Ok(Json(
        a010_sales_order::service::create(dto, claims.user_id()).await?,
    ))
}

/// PUT /api/ventas/:id/estado
pub async fn update_status(
    Path(id): Path<i64>,
    Json(update): Json<SalesStatusUpdate>,
) -> ApiResult<Json<SalesOrder>> {
    Ok(Json(a010_sales_order::service::update_status(id, update).await?))
}

/// DELETE /api/ventas/:id
pub async fn cancel(Path(id): Path<i64>) -> ApiResult<Json<Value>> {
    a010_sales_order::service::cancel(id).await?;
    Ok(Json(json!({ "ok": true })))
}
