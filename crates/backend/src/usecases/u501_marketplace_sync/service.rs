//! Mercado Libre listing sync. Listings are simulated locally: publishing
//! assigns a generated `MLM-` id and no request leaves the process.

use anyhow::Result;
use sea_orm::TransactionTrait;

use crate::domain::{a004_manufactured_product, a005_resale_product, a006_product_variant};
use crate::shared::data::db::get_connection;
use crate::shared::error::ApiError;
use contracts::domain::a005_resale_product::aggregate::ResaleProductId;
use contracts::domain::a006_product_variant::aggregate::ProductVariantId;
use contracts::shared::stock_item::StockItemRef;
use contracts::usecases::u501_marketplace_sync::dto::{
    PublishRequest, SyncProduct, SyncResponse, UpdateListingRequest,
};

pub const KIND_VARIANT: &str = "Variante";
pub const KIND_RESALE: &str = "Reventa";

/// `MLM-` plus 8 uppercase hex chars.
pub fn generate_listing_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("MLM-{}", &hex[..8])
}

/// "Pijama - M Azul"
pub fn variant_listing_name(product: &str, size: &str, color: &str) -> String {
    format!("{} - {} {}", product, size, color)
}

/// Variants first, then resale products.
pub async fn list_products() -> Result<Vec<SyncProduct>> {
    let products = a004_manufactured_product::repository::model_map().await?;
    let mut items: Vec<SyncProduct> = a006_product_variant::repository::list_models()
        .await?
        .into_iter()
        .map(|v| {
            let parent = products.get(&v.product_id);
            SyncProduct {
                unique_id: StockItemRef::Variant(ProductVariantId(v.id)).unique_id(),
                tipo: KIND_VARIANT.to_string(),
                id_db: v.id,
                nombre: variant_listing_name(
                    parent.map(|p| p.name.as_str()).unwrap_or("Producto"),
                    &v.size,
                    &v.color,
                ),
                precio: parent.map(|p| p.sale_price).unwrap_or_default(),
                stock: v.stock,
                meli_id: v.meli_id,
            }
        })
        .collect();

    items.extend(
        a005_resale_product::repository::list_models()
            .await?
            .into_iter()
            .map(|r| SyncProduct {
                unique_id: StockItemRef::Resale(ResaleProductId(r.id)).unique_id(),
                tipo: KIND_RESALE.to_string(),
                id_db: r.id,
                nombre: r.name,
                precio: r.sale_price,
                stock: r.stock,
                meli_id: r.meli_id,
            }),
    );
    Ok(items)
}

/// Links a new listing id to the item and sets its stock to the published
/// quantity.
pub async fn publish(request: PublishRequest) -> Result<SyncResponse> {
    let target = request.validate().map_err(ApiError::BadRequest)?;
    let meli_id = generate_listing_id();
    let stock = Some(request.available_quantity);

    let txn = get_connection().begin().await?;
    match target {
        StockItemRef::Variant(id) => {
            let model = a006_product_variant::repository::find_on(&txn, id.0)
                .await?
                .ok_or_else(|| ApiError::not_found("Variante no encontrada"))?;
            a006_product_variant::repository::update_listing_on(
                &txn,
                model,
                Some(Some(meli_id.clone())),
                stock,
            )
            .await?;
        }
        StockItemRef::Resale(id) => {
            let model = a005_resale_product::repository::find_on(&txn, id.0)
                .await?
                .ok_or_else(|| ApiError::not_found("Producto no encontrado"))?;
            a005_resale_product::repository::update_listing_on(
                &txn,
                model,
                Some(Some(meli_id.clone())),
                stock,
            )
            .await?;
        }
    }
    txn.commit().await?;

    tracing::info!("Published {} as {} ({})", target, meli_id, request.title);
    Ok(SyncResponse::success(
        Some(meli_id),
        "Publicado correctamente en Mercado Libre",
    ))
}

/// Finds the item carrying `meli_id` and applies the new available quantity.
pub async fn update_listing(meli_id: &str, request: UpdateListingRequest) -> Result<SyncResponse> {
    if request.available_quantity.is_some_and(|q| q < 0) {
        return Err(ApiError::bad_request("La cantidad disponible no puede ser negativa").into());
    }

    let txn = get_connection().begin().await?;
    if let Some(model) = a006_product_variant::repository::find_by_meli_id_on(&txn, meli_id).await? {
        a006_product_variant::repository::update_listing_on(
            &txn,
            model,
            None,
            request.available_quantity,
        )
        .await?;
    } else if let Some(model) =
        a005_resale_product::repository::find_by_meli_id_on(&txn, meli_id).await?
    {
        a005_resale_product::repository::update_listing_on(
            &txn,
            model,
            None,
            request.available_quantity,
        )
        .await?;
    } else {
        return Err(ApiError::not_found("Publicación no encontrada").into());
    }
    txn.commit().await?;

    Ok(SyncResponse::success(
        Some(meli_id.to_string()),
        format!("Publicación {} actualizada", meli_id),
    ))
}

/// Clears the listing id of the item named by `unique_id` (`var-n` / `rev-n`).
pub async fn unlink(unique_id: &str) -> Result<SyncResponse> {
    let target = StockItemRef::parse(unique_id)
        .ok_or_else(|| ApiError::bad_request("Identificador de producto inválido"))?;

    let txn = get_connection().begin().await?;
    let removed = match target {
        StockItemRef::Variant(id) => {
            let model = a006_product_variant::repository::find_on(&txn, id.0)
                .await?
                .ok_or_else(|| ApiError::not_found("Variante no encontrada"))?;
            let previous = model.meli_id.clone();
            a006_product_variant::repository::update_listing_on(&txn, model, Some(None), None)
                .await?;
            previous
        }
        StockItemRef::Resale(id) => {
            let model = a005_resale_product::repository::find_on(&txn, id.0)
                .await?
                .ok_or_else(|| ApiError::not_found("Producto no encontrado"))?;
            let previous = model.meli_id.clone();
            a005_resale_product::repository::update_listing_on(&txn, model, Some(None), None)
                .await?;
            previous
        }
    };
    txn.commit().await?;

    tracing::info!("Unlinked {} (was {:?})", target, removed);
    Ok(SyncResponse::success(
        removed,
        "Publicación eliminada/desvinculada",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_id_format() {
        let id = generate_listing_id();
        assert!(id.starts_with("MLM-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_ne!(id, generate_listing_id());
    }

    #[test]
    fn test_variant_listing_name() {
        assert_eq!(variant_listing_name("Pijama", "M", "Azul"), "Pijama - M Azul");
    }
}
