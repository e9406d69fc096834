use super::repository;
use crate::domain::a001_supplier;
use crate::shared::error::ApiError;
use contracts::domain::a005_resale_product::aggregate::{ResaleProduct, ResaleProductDto};

pub async fn list_all() -> anyhow::Result<Vec<ResaleProduct>> {
    repository::list_all().await
}

pub async fn create(dto: ResaleProductDto) -> anyhow::Result<ResaleProduct> {
    dto.validate().map_err(ApiError::BadRequest)?;
    if let Some(supplier_id) = dto.supplier_id {
        if a001_supplier::repository::get_by_id(supplier_id.0).await?.is_none() {
            return Err(ApiError::bad_request("Proveedor no encontrado").into());
        }
    }
    repository::insert(&dto).await
}
