use super::repository;
use crate::domain::{a003_raw_material, a004_manufactured_product};
use crate::shared::error::ApiError;
use contracts::domain::a007_bill_of_materials::aggregate::{BomItem, BomItemDto};

pub async fn list_all() -> anyhow::Result<Vec<BomItem>> {
    repository::list_all().await
}

pub async fn list_by_product(product_id: i64) -> anyhow::Result<Vec<BomItem>> {
    repository::list_by_product(product_id).await
}

/// One row per (product, material).
pub async fn create(dto: BomItemDto) -> anyhow::Result<BomItem> {
    dto.validate().map_err(ApiError::BadRequest)?;

    if a004_manufactured_product::repository::get_model(dto.product_id.0)
        .await?
        .is_none()
    {
        return Err(ApiError::bad_request("Producto no encontrado").into());
    }
    if a003_raw_material::repository::get_by_id(dto.material_id.0)
        .await?
        .is_none()
    {
        return Err(ApiError::bad_request("Material no encontrado").into());
    }
    if repository::exists(dto.product_id.0, dto.material_id.0).await? {
        return Err(
            ApiError::bad_request("Este material ya está en la lista del producto").into(),
        );
    }

    repository::insert(&dto).await
}

pub async fn delete(id: i64) -> anyhow::Result<()> {
    if !repository::delete(id).await? {
        return Err(ApiError::not_found("Item no encontrado").into());
    }
    Ok(())
}
