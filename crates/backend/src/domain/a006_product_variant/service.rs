use super::repository;
use crate::domain::a004_manufactured_product::repository as product_repository;
use crate::shared::error::ApiError;
use contracts::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantDto};

/// Variants with parent product name and price.
pub async fn list_all() -> anyhow::Result<Vec<ProductVariant>> {
    let products = product_repository::model_map().await?;
    let items = repository::list_models()
        .await?
        .into_iter()
        .map(|v| {
            let parent = products.get(&v.product_id);
            v.into_aggregate(parent)
        })
        .collect();
    Ok(items)
}

pub async fn create(dto: ProductVariantDto) -> anyhow::Result<ProductVariant> {
    dto.validate().map_err(ApiError::BadRequest)?;
    let parent = product_repository::get_model(dto.product_id.0)
        .await?
        .ok_or_else(|| ApiError::bad_request("Producto no encontrado"))?;
    let model = repository::insert(&dto).await?;
    Ok(model.into_aggregate(Some(&parent)))
}
