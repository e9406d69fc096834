use contracts::domain::a004_manufactured_product::aggregate::{
    ManufacturedProduct, ManufacturedProductDto,
};

use crate::shared::api_utils::{get_json, post_json};

/// Products come with their variants embedded.
pub async fn fetch_products() -> Result<Vec<ManufacturedProduct>, String> {
    get_json("/api/productos/fabricados").await
}

pub async fn create_product(dto: &ManufacturedProductDto) -> Result<ManufacturedProduct, String> {
    post_json("/api/productos/fabricados", dto).await
}
