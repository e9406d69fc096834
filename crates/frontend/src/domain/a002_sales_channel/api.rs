use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelDto};

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

pub async fn fetch_channels() -> Result<Vec<SalesChannel>, String> {
    get_json("/api/ventas/canales").await
}

pub async fn create_channel(dto: &SalesChannelDto) -> Result<SalesChannel, String> {
    post_json("/api/ventas/canales", dto).await
}

pub async fn update_channel(id: i64, dto: &SalesChannelDto) -> Result<SalesChannel, String> {
    put_json(&format!("/api/ventas/canales/{}", id), dto).await
}

pub async fn delete_channel(id: i64) -> Result<(), String> {
    delete(&format!("/api/ventas/canales/{}", id)).await
}
