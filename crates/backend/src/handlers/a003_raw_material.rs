use axum::{extract::Path, Json};
use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto};

use crate::domain::a003_raw_material;
use crate::shared::error::ApiResult;

/// GET /api/materia-prima
pub async fn list_all() -> ApiResult<Json<Vec<RawMaterial>>> {
    Ok(Json(a003_raw_material::service::list_all().await?))
}

/// GET /api/materia-prima/:id
pub async fn get_by_id(Path(id): Path<i64>) -> ApiResult<Json<RawMaterial>> {
    Ok(Json(a003_raw_material::service::get_by_id(id).await?))
}

/// POST /api/materia-prima
pub async fn create(Json(dto): Json<RawMaterialDto>) -> ApiResult<Json<RawMaterial>> {
    Ok(Json(a003_raw_material::service::create(dto).await?))
}
