use sea_orm::TransactionTrait;

use super::repository;
use crate::domain::{a001_supplier, a003_raw_material, a005_resale_product};
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use contracts::domain::a009_purchase_order::aggregate::{
    PurchaseOrder, PurchaseOrderDto, PurchaseStatusUpdate,
};
use contracts::enums::PurchaseOrderStatus;
use contracts::shared::stock_item::PurchaseItemRef;

pub async fn list_all() -> anyhow::Result<Vec<PurchaseOrder>> {
    repository::list_all().await
}

async fn load(id: i64) -> anyhow::Result<PurchaseOrder> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Orden no encontrada").into())
}

pub async fn create(dto: PurchaseOrderDto) -> anyhow::Result<PurchaseOrder> {
    dto.validate().map_err(ApiError::BadRequest)?;
    if a001_supplier::repository::get_by_id(dto.supplier_id.0)
        .await?
        .is_none()
    {
        return Err(ApiError::bad_request("Proveedor no encontrado").into());
    }

    let txn = get_connection().begin().await?;
    for line in &dto.lines {
        let exists = match line.item_ref() {
            Some(PurchaseItemRef::Material(id)) => {
                a003_raw_material::repository::find_on(&txn, id.0).await?.is_some()
            }
            Some(PurchaseItemRef::Resale(id)) => {
                a005_resale_product::repository::find_on(&txn, id.0).await?.is_some()
            }
            None => false,
        };
        if !exists {
            return Err(ApiError::bad_request("Artículo no encontrado").into());
        }
    }
    let id = repository::insert_on(&txn, &dto).await?;
    txn.commit().await?;

    tracing::info!(
        "Purchase order {} created with {} lines",
        id,
        dto.lines.len()
    );
    load(id).await
}

/// Manual transitions between Solicitada and En Tránsito. Receiving moves
/// stock and goes through [`receive`].
pub async fn update_status(id: i64, update: PurchaseStatusUpdate) -> anyhow::Result<PurchaseOrder> {
    let conn = get_connection();
    let order = repository::find_header_on(conn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Orden no encontrada"))?;
    let current = order.status();

    if current.is_received() {
        return Err(ApiError::bad_request("Esta orden ya fue recibida").into());
    }
    if current != update.status {
        if !current.can_change_to(update.status) {
            return Err(ApiError::BadRequest(format!(
                "No se puede cambiar el estado de {} a {}",
                current.label(),
                update.status.label()
            ))
            .into());
        }
        repository::set_status_on(conn, order, update.status).await?;
    }
    load(id).await
}

/// Adds every line's quantity to the referenced stock and marks the order
/// `Recibida`, in one transaction.
pub async fn receive(id: i64) -> anyhow::Result<PurchaseOrder> {
    let txn = get_connection().begin().await?;
    let order = repository::find_header_on(&txn, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Orden no encontrada"))?;
    if order.status().is_received() {
        return Err(ApiError::bad_request("Esta orden ya fue recibida").into());
    }

    let lines = repository::lines_on(&txn, id).await?;
    for line in &lines {
        match (line.material_id, line.resale_product_id) {
            (Some(material_id), _) => {
                a003_raw_material::repository::add_stock_on(&txn, material_id, line.quantity)
                    .await?
            }
            (None, Some(resale_id)) => {
                a005_resale_product::repository::add_stock_on(
                    &txn,
                    resale_id,
                    line.quantity.round() as i64,
                )
                .await?
            }
            (None, None) => tracing::warn!("Purchase line {} has no item, skipped", line.id),
        }
    }
    repository::set_status_on(&txn, order, PurchaseOrderStatus::Received).await?;
    txn.commit().await?;

    tracing::info!("Purchase order {} received ({} lines)", id, lines.len());
    load(id).await
}
