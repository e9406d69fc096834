use axum::{extract::Query, Json};
use chrono::NaiveDate;
use contracts::projections::p900_reports::dto::{
    MaterialInventoryRow, ProductInventoryRow, SalesReportRow,
};
use contracts::shared::date_range::DateRange;
use serde::Deserialize;

use crate::projections::p900_reports::{row_builder, service};
use crate::shared::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SalesReportQuery {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    /// Minutes east of UTC; days are read as UTC when absent.
    #[serde(default)]
    pub utc_offset: i32,
}

/// GET /api/reportes/ventas?fecha_inicio=YYYY-MM-DD&fecha_fin=YYYY-MM-DD[&utc_offset=-360]
pub async fn sales(Query(query): Query<SalesReportQuery>) -> ApiResult<Json<Vec<SalesReportRow>>> {
    let range = DateRange::new(query.fecha_inicio, query.fecha_fin).map_err(ApiError::BadRequest)?;
    let offset = row_builder::client_offset(query.utc_offset).ok_or_else(|| {
        ApiError::BadRequest(format!("Desfase horario inválido: {}", query.utc_offset))
    })?;
    Ok(Json(service::sales_report(range, offset).await?))
}

/// GET /api/reportes/inventario-producto
pub async fn product_inventory() -> ApiResult<Json<Vec<ProductInventoryRow>>> {
    Ok(Json(service::product_inventory().await?))
}

/// GET /api/reportes/inventario-materia
pub async fn material_inventory() -> ApiResult<Json<Vec<MaterialInventoryRow>>> {
    Ok(Json(service::material_inventory().await?))
}
