use super::repository;
use crate::domain::{a003_raw_material, a005_resale_product, a009_purchase_order};
use crate::shared::error::ApiError;
use contracts::domain::a001_supplier::aggregate::{Supplier, SupplierDto};

pub async fn list_all() -> anyhow::Result<Vec<Supplier>> {
    repository::list_all().await
}

pub async fn create(dto: SupplierDto) -> anyhow::Result<Supplier> {
    dto.validate().map_err(ApiError::BadRequest)?;
    repository::insert(&dto).await
}

pub async fn update(id: i64, dto: SupplierDto) -> anyhow::Result<Supplier> {
    dto.validate().map_err(ApiError::BadRequest)?;
    repository::update(id, &dto)
        .await?
        .ok_or_else(|| ApiError::not_found("Proveedor no encontrado").into())
}

/// Refused while materials, resale products or purchase orders point at it.
pub async fn delete(id: i64) -> anyhow::Result<()> {
    if repository::get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Proveedor no encontrado").into());
    }

    let references = a003_raw_material::repository::count_by_supplier(id).await?
        + a005_resale_product::repository::count_by_supplier(id).await?
        + a009_purchase_order::repository::count_by_supplier(id).await?;
    if references > 0 {
        return Err(ApiError::bad_request(
            "No se puede eliminar el proveedor: tiene materiales, productos u órdenes de compra asociadas",
        )
        .into());
    }

    repository::delete(id).await?;
    Ok(())
}
