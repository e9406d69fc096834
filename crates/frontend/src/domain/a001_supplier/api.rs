use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierDto};

use crate::shared::api_utils::{delete, get_json, post_json, put_json};

pub async fn fetch_suppliers() -> Result<Vec<Supplier>, String> {
    get_json("/api/productos/proveedores").await
}

pub async fn create_supplier(dto: &SupplierDto) -> Result<Supplier, String> {
    post_json("/api/productos/proveedores", dto).await
}

pub async fn update_supplier(id: i64, dto: &SupplierDto) -> Result<Supplier, String> {
    put_json(&format!("/api/productos/proveedores/{}", id), dto).await
}

pub async fn delete_supplier(id: i64) -> Result<(), String> {
    delete(&format!("/api/productos/proveedores/{}", id)).await
}
