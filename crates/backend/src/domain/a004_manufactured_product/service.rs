use super::repository;
use crate::domain::a006_product_variant;
use crate::shared::error::ApiError;
use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductDto,
};
use contracts::domain::a006_product_variant::aggregate::ProductVariant;
use std::collections::HashMap;

/// Products with their variants, ordered by name.
pub async fn list_all() -> anyhow::Result<Vec<ManufacturedProduct>> {
    let products = repository::list_models().await?;

    let mut by_product: HashMap<i64, Vec<ProductVariant>> = HashMap::new();
    for variant in a006_product_variant::service::list_all().await? {
        by_product.entry(variant.product_id.0).or_default().push(variant);
    }

    let items = products
        .into_iter()
        .map(|p| {
            let variants = by_product.remove(&p.id).unwrap_or_default();
            p.into_aggregate(variants)
        })
        .collect();
    Ok(items)
}

pub async fn create(dto: ManufacturedProductDto) -> anyhow::Result<ManufacturedProduct> {
    dto.validate().map_err(ApiError::BadRequest)?;
    repository::insert(&dto).await
}
