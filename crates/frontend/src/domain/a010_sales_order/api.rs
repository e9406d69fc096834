use contracts::domain::a010_sales_order::aggregate::{SalesOrder, SalesOrderDto, SalesStatusUpdate};
use contracts::enums::SalesOrderStatus;

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

pub async fn fetch_sales() -> Result<Vec<SalesOrder>, String> {
    get_json("/api/ventas").await
}

pub async fn create_sale(dto: &SalesOrderDto) -> Result<SalesOrder, String> {
    post_json("/api/ventas", dto).await
}

pub async fn update_status(id: i64, status: SalesOrderStatus) -> Result<SalesOrder, String> {
    put_json(&format!("/api/ventas/{}/estado", id), &SalesStatusUpdate { status }).await
}

/// Cancels the sale and returns its lines to stock.
pub async fn cancel_sale(id: i64) -> Result<(), String> {
    delete(&format!("/api/ventas/{}", id)).await
}
