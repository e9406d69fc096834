use axum::{extract::Path, Json};
use contracts::usecases::u501_marketplace_sync::dto::{
    PublishRequest, SyncProduct, SyncResponse, UpdateListingRequest,
};

use crate::shared::error::ApiResult;
use crate::usecases::u501_marketplace_sync::service;

/// GET /api/sincronizacion/productos
pub async fn list_products() -> ApiResult<Json<Vec<SyncProduct>>> {
    Ok(Json(service::list_products().await?))
}

/// POST /api/sincronizacion/mercadolibre/publicar
pub async fn publish(Json(request): Json<PublishRequest>) -> ApiResult<Json<SyncResponse>> {
    Ok(Json(service::publish(request).await?))
}

/// PUT /api/sincronizacion/mercadolibre/:meli_id
pub async fn update_listing(
    Path(meli_id): Path<String>,
    Json(request): Json<UpdateListingRequest>,
) -> ApiResult<Json<SyncResponse>> {
    Ok(Json(service::update_listing(&meli_id, request).await?))
}

/// DELETE /api/sincronizacion/mercadolibre/:unique_id
pub async fn unlink(Path(unique_id): Path<String>) -> ApiResult<Json<SyncResponse>> {
    Ok(Json(service::unlink(&unique_id).await?))
}
