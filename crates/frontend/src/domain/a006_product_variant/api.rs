use contracts::domain::a006_product_variant::aggregate::{ProductVariant, ProductVariantDto};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_variants() -> Result<Vec<ProductVariant>, String> {
    get_json("/api/produccion/variantes").await
}

pub async fn create_variant(dto: &ProductVariantDto) -> Result<ProductVariant, String> {
    post_json("/api/produccion/variantes", dto).await
}
