use contracts::domain::a005_resale_product::aggregate::{ResaleProduct, ResaleProductDto};

use crate::shared::api_utils::{get_json, post_json};

pub async fn fetch_resale_products() -> Result<Vec<ResaleProduct>, String> {
    get_json("/api/productos/reventa").await
}

pub async fn create_resale_product(dto: &ResaleProductDto) -> Result<ResaleProduct, String> {
    post_json("/api/productos/reventa", dto).await
}
