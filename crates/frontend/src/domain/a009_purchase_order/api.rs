use contracts::domain::a009_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseStatusUpdate,
};
use contracts::enums::PurchaseOrderStatus;

use crate::shared::api_utils::{get_json, post_json, put_empty, put_json};

pub async fn fetch_purchases() -> Result<Vec<PurchaseOrder>, String> {
    get_json("/api/compras").await
}

pub async fn create_purchase(dto: &PurchaseOrderDto) -> Result<PurchaseOrder, String> {
    post_json("/api/compras", dto).await
}

pub async fn update_status(id: i64, status: PurchaseOrderStatus) -> Result<PurchaseOrder, String> {
    put_json(
        &format!("/api/compras/{}/estado", id),
        &PurchaseStatusUpdate { status },
    )
    .await
}

/// Adds every line to stock and marks the order received.
pub async fn receive(id: i64) -> Result<PurchaseOrder, String> {
    put_empty(&format!("/api/compras/{}/recibir", id)).await
}
