use super::repository;
use crate::domain::a010_sales_order;
use crate::shared::error::ApiError;
use contracts::domain::a002_sales_channel::aggregate::{SalesChannel, SalesChannelDto};

pub async fn list_all() -> anyhow::Result<Vec<SalesChannel>> {
    repository::list_all().await
}

pub async fn create(dto: SalesChannelDto) -> anyhow::Result<SalesChannel> {
    dto.validate().map_err(ApiError::BadRequest)?;
    ensure_unique_name(&dto.name, None).await?;
    repository::insert(&dto).await
}

pub async fn update(id: i64, dto: SalesChannelDto) -> anyhow::Result<SalesChannel> {
    dto.validate().map_err(ApiError::BadRequest)?;
    ensure_unique_name(&dto.name, Some(id)).await?;
    repository::update(id, &dto)
        .await?
        .ok_or_else(|| ApiError::not_found("Canal no encontrado").into())
}

/// Refused while sales reference the channel.
pub async fn delete(id: i64) -> anyhow::Result<()> {
    if repository::get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Canal no encontrado").into());
    }
    if a010_sales_order::repository::count_by_channel(id).await? > 0 {
        return Err(
            ApiError::bad_request("No se puede eliminar el canal: tiene ventas registradas").into(),
        );
    }
    repository::delete(id).await?;
    Ok(())
}

async fn ensure_unique_name(name: &str, current_id: Option<i64>) -> anyhow::Result<()> {
    if let Some(existing) = repository::find_by_name(name.trim()).await? {
        if Some(existing.id.0) != current_id {
            return Err(ApiError::bad_request("Ya existe un canal con ese nombre").into());
        }
    }
    Ok(())
}
