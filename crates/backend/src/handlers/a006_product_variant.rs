use axum::Json;
use contracts::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantDto};

use crate::domain::a006_product_variant;
use crate::shared::error::ApiResult;

/// GET /api/produccion/variantes
pub async fn list_all() -> ApiResult<Json<Vec<ProductVariant>>> {
    Ok(Json(a006_product_variant::service::list_all().await?))
}

/// POST /api/produccion/variantes
pub async fn create(Json(dto): Json<ProductVariantDto>) -> ApiResult<Json<ProductVariant>> {
    Ok(Json(a006_product_variant::service::create(dto).await?))
}
