use axum::Json;
use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductDto,
};

use crate::domain::a004_manufactured_product;
use crate::shared::error::ApiResult;

/// GET /api/productos/fabricados
pub async fn list_all() -> ApiResult<Json<Vec<ManufacturedProduct>>> {
    Ok(Json(a004_manufactured_product::service::list_all().await?))
}

/// POST /api/productos/fabricados
pub async fn create(
    Json(dto): Json<ManufacturedProductDto>,
) -> ApiResult<Json<ManufacturedProduct>> {
    Ok(Json(a004_manufactured_product::service::create(dto).await?))
}
