use axum::Json;
use contracts::domain::a005_resale_product::aggregate::{ResaleProduct, ResaleProductDto};

use crate::domain::a005_resale_product;
use crate::shared::error::ApiResult;

/// GET /api/productos/reventa
pub async fn list_all() -> ApiResult<Json<Vec<ResaleProduct>>> {
    Ok(Json(a005_resale_product::service::list_all().await?))
}

/// POST /api/productos/reventa
pub async fn create(Json(dto): Json<ResaleProductDto>) -> ApiResult<Json<ResaleProduct>> {
    Ok(Json(a005_resale_product::service::create(dto).await?))
}
