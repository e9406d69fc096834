use super::repository;
use crate::domain::a001_supplier;
use crate::shared::error::ApiError;
use contracts::domain::a003_raw_material::aggregate::{RawMaterial, RawMaterialDto};

pub async fn list_all() -> anyhow::Result<Vec<RawMaterial>> {
    repository::list_all().await
}

pub async fn get_by_id(id: i64) -> anyhow::Result<RawMaterial> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Material no encontrado").into())
}

pub async fn create(dto: RawMaterialDto) -> anyhow::Result<RawMaterial> {
    dto.validate().map_err(ApiError::BadRequest)?;
    if let Some(supplier_id) = dto.supplier_id {
        if a001_supplier::repository::get_by_id(supplier_id.0).await?.is_none() {
            return Err(ApiError::bad_request("Proveedor no encontrado").into());
        }
    }
    let material = repository::insert(&dto).await?;
    tracing::info!("Raw material {} created: {}", material.id, material.name);
    Ok(material)
}
