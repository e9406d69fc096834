use contracts::domain::a007_bill_of_materials::aggregate::{BomItem, BomItemDto};

use crate::shared::api_utils::{delete, get_json, post_json};

pub async fn fetch_bom() -> Result<Vec<BomItem>, String> {
    get_json("/api/produccion/bom").await
}

pub async fn create_bom_item(dto: &BomItemDto) -> Result<BomItem, String> {
    post_json("/api/produccion/bom", dto).await
}

pub async fn delete_bom_item(id: i64) -> Result<(), String> {
    delete(&format!("/api/produccion/bom/{}", id)).await
}
