use contracts::usecases::u501_marketplace_sync::dto::{
    PublishRequest, SyncProduct, SyncResponse, UpdateListingRequest,
};

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

/// Variants and resale products in one list, with their listing ids.
pub async fn fetch_sync_products() -> Result<Vec<SyncProduct>, String> {
    get_json("/api/sincronizacion/productos").await
}

pub async fn publish(request: &PublishRequest) -> Result<SyncResponse, String> {
    post_json("/api/sincronizacion/mercadolibre/publicar", request).await
}

pub async fn update_listing(
    meli_id: &str,
    request: &UpdateListingRequest,
) -> Result<SyncResponse, String> {
    put_json(
        &format!("/api/sincronizacion/mercadolibre/{}", urlencoding::encode(meli_id)),
        request,
    )
    .await
}

/// `unique_id` is `var-<id>` or `rev-<id>`.
pub async fn unlink(unique_id: &str) -> Result<(), String> {
    delete(&format!(
        "/api/sincronizacion/mercadolibre/{}",
        urlencoding::encode(unique_id)
    ))
    .await
}
