use contracts::domain::a008_production_order::aggregate::{ProductionOrder, ProductionOrderDto};

use crate::shared::api_utils::{get_json, post_json, put_empty};

pub async fn fetch_orders() -> Result<Vec<ProductionOrder>, String> {
    get_json("/api/produccion/ordenes").await
}

pub async fn create_order(dto: &ProductionOrderDto) -> Result<ProductionOrder, String> {
    post_json("/api/produccion/ordenes", dto).await
}

/// Consumes materials per the BOM; a shortage comes back as the error detail.
pub async fn finish_order(id: i64) -> Result<ProductionOrder, String> {
    put_empty(&format!("/api/produccion/ordenes/{}/terminar", id)).await
}
